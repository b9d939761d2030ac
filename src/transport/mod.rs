//! Transport adapters
//!
//! A transport reads caller messages from somewhere, hands them to the
//! [`CommandInterpreter`](crate::command::CommandInterpreter) and delivers the
//! replies back. Delivery goes through the [`ReplySink`] capability so the
//! interpreter never knows which transport it is serving.

use crate::command::Reply;
use std::io::{self, Write};

pub mod console;

pub use console::{ConsoleTransport, CONSOLE_CALLER, EXIT_SENTINEL};

/// Capability to deliver replies to a caller
pub trait ReplySink {
    /// Deliver one reply
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying channel rejects the message.
    fn send(&mut self, reply: &Reply) -> io::Result<()>;

    /// Deliver replies in order, stopping at the first failure
    fn send_all(&mut self, replies: &[Reply]) -> io::Result<()> {
        replies.iter().try_for_each(|reply| self.send(reply))
    }
}

/// Writes each reply as plain text followed by a newline
///
/// Markdown replies are written unescaped; escaping only matters to chat
/// transports.
#[derive(Debug)]
pub struct WriterSink<W> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ReplySink for WriterSink<W> {
    fn send(&mut self, reply: &Reply) -> io::Result<()> {
        writeln!(self.writer, "{}", reply.text)?;
        self.writer.flush()
    }
}
