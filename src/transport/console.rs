//! Console transport
//!
//! Line-oriented read-eval-reply loop for operating the ledger from a
//! terminal. Every line comes from the single caller [`CONSOLE_CALLER`].
//! While an upload session is open each line is one code and `done`
//! finishes the batch; otherwise lines are commands and `exit` quits.

use crate::command::{CommandInterpreter, Reply};
use crate::core::LedgerStore;
use crate::transport::{ReplySink, WriterSink};
use std::io::{self, BufRead, Write};
use tracing::{debug, info};

/// Caller id used for console input
pub const CONSOLE_CALLER: &str = "console";

/// Line that ends the console loop
pub const EXIT_SENTINEL: &str = "exit";

const COMMAND_PROMPT: &str = "Enter command: ";
const CODE_PROMPT: &str = "Enter code (or type 'done' to finish): ";

/// Console adapter over any reader and writer
#[derive(Debug)]
pub struct ConsoleTransport<R, W> {
    input: R,
    sink: WriterSink<W>,
}

impl<R: BufRead, W: Write> ConsoleTransport<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            sink: WriterSink::new(output),
        }
    }

    /// Run until `exit` or end of input
    ///
    /// # Arguments
    ///
    /// * `interpreter` - Interpreter that handles each line
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails. Ledger
    /// failures are replies, not errors.
    pub fn run<S: LedgerStore>(
        &mut self,
        interpreter: &mut CommandInterpreter<S>,
    ) -> io::Result<()> {
        info!("Console started");
        let mut line = String::new();

        loop {
            let in_session = interpreter.has_session(CONSOLE_CALLER);
            self.prompt(in_session)?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                debug!("End of console input");
                break;
            }
            let message = line.trim();

            if !in_session && message.eq_ignore_ascii_case(EXIT_SENTINEL) {
                break;
            }

            let replies = interpreter.handle(CONSOLE_CALLER, message);
            if replies.is_empty()
                && !in_session
                && !message.is_empty()
                && !interpreter.has_session(CONSOLE_CALLER)
            {
                let prefix = &interpreter.config().prefix;
                self.sink.send(&Reply::plain(format!(
                    "Invalid command. Use '{prefix}help' or '{EXIT_SENTINEL}' to quit."
                )))?;
                continue;
            }
            self.sink.send_all(&replies)?;
        }

        info!("Console stopped");
        Ok(())
    }

    pub fn into_output(self) -> W {
        self.sink.into_inner()
    }

    fn prompt(&mut self, in_session: bool) -> io::Result<()> {
        let prompt = if in_session { CODE_PROMPT } else { COMMAND_PROMPT };
        let writer = self.sink.get_mut();
        write!(writer, "{prompt}")?;
        writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::InterpreterConfig;
    use crate::core::{BookKind, CodeLedger, SessionMode, DEFAULT_SESSION_TIMEOUT};
    use crate::io::MemoryStore;
    use std::io::Cursor;
    use std::time::Duration;

    fn run(input: &str) -> (String, CommandInterpreter<MemoryStore>) {
        run_with_timeout(input, DEFAULT_SESSION_TIMEOUT)
    }

    fn run_with_timeout(
        input: &str,
        session_timeout: Duration,
    ) -> (String, CommandInterpreter<MemoryStore>) {
        let config = InterpreterConfig {
            session_mode: SessionMode::UntilSentinel,
            session_timeout,
            ..InterpreterConfig::default()
        };
        let mut interpreter =
            CommandInterpreter::new(CodeLedger::new(MemoryStore::new()), config).unwrap();
        let mut console = ConsoleTransport::new(Cursor::new(input.to_string()), Vec::new());

        console.run(&mut interpreter).unwrap();

        let output = String::from_utf8(console.into_output()).unwrap();
        (output, interpreter)
    }

    #[test]
    fn test_exit_stops_reading() {
        let (output, _) = run("exit\nJstock\n");
        assert_eq!(output, COMMAND_PROMPT);
    }

    #[test]
    fn test_exit_is_case_insensitive() {
        let (output, _) = run("EXIT\n");
        assert_eq!(output, COMMAND_PROMPT);
    }

    #[test]
    fn test_load_collects_until_done() {
        let (output, interpreter) = run("Jload 60\nA\nB\ndone\n");

        let expected = [
            COMMAND_PROMPT,
            "Upload codes for 60 UC (one per line, 'done' to finish):\n",
            CODE_PROMPT,
            CODE_PROMPT,
            CODE_PROMPT,
            "Added 2 codes for amount: 60\n",
            COMMAND_PROMPT,
        ]
        .concat();
        assert_eq!(output, expected);
        let inventory = interpreter.ledger().store().book(BookKind::Inventory);
        assert_eq!(inventory.group(60).unwrap().len(), 2);
    }

    #[test]
    fn test_invalid_line_gets_hint() {
        let (output, _) = run("hello\n\n");

        let expected = [
            COMMAND_PROMPT,
            "Invalid command. Use 'Jhelp' or 'exit' to quit.\n",
            COMMAND_PROMPT,
            COMMAND_PROMPT,
        ]
        .concat();
        assert_eq!(output, expected);
    }

    #[test]
    fn test_exit_inside_session_is_a_code() {
        let (_, interpreter) = run("Jload 60\nexit\ndone\n");

        let inventory = interpreter.ledger().store().book(BookKind::Inventory);
        assert!(inventory.group(60).unwrap().contains("exit"));
    }

    #[test]
    fn test_command_during_upload_keeps_typed_codes() {
        let (output, interpreter) = run("Jload 60\nX1\nX2\nJstock\n");

        assert!(output.contains("Upload for 60 UC cancelled, saving 2 collected codes.\n"));
        assert!(output.contains("Added 2 codes for amount: 60\n"));
        assert!(output.contains("☞ 60  UC ➪ 2 pcs"));
        let inventory = interpreter.ledger().store().book(BookKind::Inventory);
        assert!(inventory.group(60).unwrap().contains("X2"));
    }

    #[test]
    fn test_expired_upload_keeps_typed_code() {
        // Every session is already expired when the next line arrives
        let (output, interpreter) = run_with_timeout("Jload 60\nX1\n", Duration::ZERO);

        let expected = [
            COMMAND_PROMPT,
            "Upload codes for 60 UC (one per line, 'done' to finish):\n",
            COMMAND_PROMPT,
            "Upload for 60 UC expired, saving 1 collected codes.\n",
            "Added 1 codes for amount: 60\n",
            COMMAND_PROMPT,
        ]
        .concat();
        assert_eq!(output, expected);
        let inventory = interpreter.ledger().store().book(BookKind::Inventory);
        assert!(inventory.group(60).unwrap().contains("X1"));
    }
}
