//! Command interpreter
//!
//! Maps prefixed text messages onto [`CodeLedger`] operations and formats the
//! replies. It also drives the interactive `load` flow through a
//! [`SessionRegistry`].
//!
//! # Message handling
//!
//! 1. If the caller has a live upload session and the message is not a
//!    recognized command, the message feeds the session
//! 2. A recognized command cancels any pending session and is executed
//! 3. Messages without the prefix get no reply
//!
//! Codes collected by a one-per-line session that is cancelled or expires
//! are uploaded rather than dropped, with a notice to the caller.
//!
//! Validation failures and stock-outs are answered with a short message and
//! never reach the stores.

use crate::command::extract::extract_codes;
use crate::command::format::{self, Reply};
use crate::command::parser::{
    is_bulk_amount, parse_amount, parse_bulk_amount, parse_count, parse_price, CommandParser,
    ParsedCommand, Verb,
};
use crate::core::{
    CodeLedger, LedgerStore, SessionMode, SessionRegistry, UploadSession,
    DEFAULT_SESSION_TIMEOUT,
};
use crate::types::{Denomination, LedgerError};
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

/// Sentinel that ends an `UntilSentinel` upload session
pub const DONE_SENTINEL: &str = "done";

/// Interpreter configuration
#[derive(Clone, Debug, PartialEq)]
pub struct InterpreterConfig {
    /// Command prefix, e.g. `J` for `Jstock`
    pub prefix: String,
    /// Inactivity timeout for upload sessions
    pub session_timeout: Duration,
    /// How upload sessions collect codes
    pub session_mode: SessionMode,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            prefix: String::from("J"),
            session_timeout: DEFAULT_SESSION_TIMEOUT,
            session_mode: SessionMode::NextMessage,
        }
    }
}

/// Text command front end for a [`CodeLedger`]
#[derive(Debug)]
pub struct CommandInterpreter<S> {
    ledger: CodeLedger<S>,
    parser: CommandParser,
    sessions: SessionRegistry,
    config: InterpreterConfig,
}

impl<S: LedgerStore> CommandInterpreter<S> {
    /// Create an interpreter over `ledger`
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidArgument`] if the prefix is empty.
    pub fn new(ledger: CodeLedger<S>, config: InterpreterConfig) -> Result<Self, LedgerError> {
        let parser = CommandParser::new(&config.prefix)?;
        let sessions = SessionRegistry::new(config.session_timeout);

        Ok(Self {
            ledger,
            parser,
            sessions,
            config,
        })
    }

    pub fn ledger(&self) -> &CodeLedger<S> {
        &self.ledger
    }

    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    /// Whether `caller` is in the middle of an upload session
    pub fn has_session(&self, caller: &str) -> bool {
        self.sessions.is_active(caller, Instant::now())
    }

    /// Handle one message from `caller`
    pub fn handle(&mut self, caller: &str, message: &str) -> Vec<Reply> {
        self.handle_at(caller, message, Instant::now())
    }

    /// Handle one message from `caller` as if received at `now`
    pub fn handle_at(&mut self, caller: &str, message: &str, now: Instant) -> Vec<Reply> {
        let message = message.trim();
        let command = self
            .parser
            .parse(message)
            .and_then(|parsed| Verb::parse(&parsed.verb).map(|verb| (verb, parsed)));

        let mut replies = Vec::new();
        let mut absorbed = false;
        for (owner, mut session) in self.sessions.purge_expired(now) {
            let own = owner == caller;
            // A line typed at the code prompt still belongs to the expired batch
            if own && command.is_none() && session.mode == SessionMode::UntilSentinel {
                absorbed = true;
                if !message.is_empty() && !message.eq_ignore_ascii_case(DONE_SENTINEL) {
                    session.collected.push(message.to_string());
                }
            }
            let flushed = self.save_unfinished(&owner, session, true);
            if own {
                replies.extend(flushed);
            }
        }
        if absorbed {
            return replies;
        }

        if self.sessions.active(caller, now).is_some() {
            match command {
                Some(_) => {
                    info!(caller, "Command received, cancelling upload session");
                    if let Some(session) = self.sessions.close(caller) {
                        replies.extend(self.save_unfinished(caller, session, false));
                    }
                }
                None => return self.continue_session(caller, message, now),
            }
        }

        match command {
            Some((verb, parsed)) => replies.extend(self.dispatch(caller, verb, &parsed, now)),
            None => {
                if let Some(parsed) = self.parser.parse(message) {
                    replies.push(format::unknown(&parsed.verb));
                }
            }
        }
        replies
    }

    /// Upload what an expired or cancelled session collected
    fn save_unfinished(
        &mut self,
        caller: &str,
        session: UploadSession,
        expired: bool,
    ) -> Vec<Reply> {
        if session.collected.is_empty() {
            debug!(caller, amount = session.amount, expired, "Dropped empty upload session");
            return Vec::new();
        }

        info!(
            caller,
            amount = session.amount,
            codes = session.collected.len(),
            expired,
            "Saving codes from unfinished upload session"
        );
        let mut replies = vec![format::unfinished_upload(
            session.amount,
            session.collected.len(),
            expired,
        )];
        replies.extend(self.store_codes(session.amount, &session.collected));
        replies
    }

    fn dispatch(
        &mut self,
        caller: &str,
        verb: Verb,
        command: &ParsedCommand,
        now: Instant,
    ) -> Vec<Reply> {
        debug!(caller, ?verb, args = ?command.args, "Dispatching command");

        match verb {
            Verb::Start => vec![format::greeting(&self.config.prefix)],
            Verb::Help => vec![format::help(&self.config.prefix)],
            Verb::Rate => match self.ledger.list_prices() {
                Ok(entries) => vec![format::price_list(entries)],
                Err(e) => vec![report(&e)],
            },
            Verb::Baki => self.redeem(&command.args),
            Verb::Price => self.set_price(&command.args),
            Verb::Stock => match self.ledger.stock_summary() {
                Ok(summary) => vec![format::stock(&summary)],
                Err(e) => vec![report(&e)],
            },
            Verb::Check => {
                let result = self
                    .ledger
                    .due_summary()
                    .and_then(|summary| Ok((summary, self.ledger.due_balance()?)));
                match result {
                    Ok((summary, balance)) => vec![format::dues(&summary, &balance)],
                    Err(e) => vec![report(&e)],
                }
            }
            Verb::Clear => match self.ledger.clear_dues() {
                Ok(()) => vec![format::cleared()],
                Err(e) => vec![report(&e)],
            },
            Verb::Up => self.upload(command),
            Verb::Load => self.open_session(caller, &command.args, now),
        }
    }

    fn redeem(&mut self, args: &[String]) -> Vec<Reply> {
        let prefix = &self.config.prefix;
        let Some(amount_arg) = args.first() else {
            return vec![Reply::plain(format!(
                "Usage: {prefix}baki <amount> [count]\nExample: {prefix}baki 36 or {prefix}baki 36 2"
            ))];
        };

        let parsed = parse_amount(amount_arg).and_then(|amount| {
            let count = args.get(1).map(|c| parse_count(c)).transpose()?;
            Ok((amount, count.unwrap_or(1)))
        });
        let Ok((amount, count)) = parsed else {
            return vec![Reply::plain("Invalid amount or count.")];
        };

        match self.ledger.redeem(amount, count) {
            Ok(redemption) => vec![format::redeemed(&redemption)],
            Err(LedgerError::InsufficientStock { amount, .. }) => vec![format::stock_out(amount)],
            Err(e) => vec![report(&e)],
        }
    }

    fn set_price(&mut self, args: &[String]) -> Vec<Reply> {
        let [amount_arg, price_arg, ..] = args else {
            return vec![Reply::plain(format!(
                "Usage: {}price <amount> <price>",
                self.config.prefix
            ))];
        };

        let parsed = parse_amount(amount_arg)
            .and_then(|amount| Ok((amount, parse_price(price_arg)?)));
        let Ok((amount, price)) = parsed else {
            return vec![Reply::plain("Invalid amount or price.")];
        };

        match self.ledger.set_price(amount, price) {
            Ok(update) => vec![format::price_updated(update.amount, update.price)],
            Err(e) => vec![report(&e)],
        }
    }

    fn upload(&mut self, command: &ParsedCommand) -> Vec<Reply> {
        let prefix = &self.config.prefix;
        let [amount_arg, _, ..] = command.args.as_slice() else {
            return vec![Reply::plain(format!(
                "Usage: {prefix}up <amount> <code1> [<code2> ...]\nExample: {prefix}up 80 BDMB-K-S-00982283 1963-1773-2113-7118 BDMB-L-S-00422493 4516-7279-2257-5235"
            ))];
        };

        if is_bulk_amount(amount_arg) {
            let Ok(amount) = parse_bulk_amount(amount_arg) else {
                return vec![Reply::plain(
                    "Invalid amount format. Please provide a valid number before 'uc'.",
                )];
            };
            let text = command
                .rest
                .trim_start()
                .strip_prefix(amount_arg.as_str())
                .unwrap_or_default();
            return self.upload_extracted(amount, text);
        }

        let Ok(amount) = parse_amount(amount_arg) else {
            return vec![Reply::plain(
                "Invalid amount format. Please provide a valid number.",
            )];
        };
        self.store_codes(amount, &command.args[1..])
    }

    fn open_session(&mut self, caller: &str, args: &[String], now: Instant) -> Vec<Reply> {
        let Some(amount_arg) = args.first() else {
            return vec![Reply::plain(format!(
                "Usage: {}load <amount>",
                self.config.prefix
            ))];
        };
        let Ok(amount) = parse_amount(amount_arg) else {
            return vec![Reply::plain(
                "Invalid amount format. Please provide a valid number.",
            )];
        };

        let mode = self.config.session_mode;
        if let Some(previous) = self.sessions.open(caller, amount, mode, now) {
            info!(caller, previous = previous.amount, "Replaced upload session");
        }
        info!(caller, amount, ?mode, "Opened upload session");

        vec![format::upload_prompt(
            amount,
            mode == SessionMode::UntilSentinel,
        )]
    }

    fn continue_session(&mut self, caller: &str, message: &str, now: Instant) -> Vec<Reply> {
        let Some(session) = self.sessions.active(caller, now) else {
            return Vec::new();
        };

        match session.mode {
            SessionMode::NextMessage => {
                let amount = session.amount;
                self.sessions.close(caller);
                self.upload_extracted(amount, message)
            }
            SessionMode::UntilSentinel => {
                if !message.eq_ignore_ascii_case(DONE_SENTINEL) {
                    if !message.is_empty() {
                        session.collected.push(message.to_string());
                    }
                    session.touch(now);
                    return Vec::new();
                }

                let amount = session.amount;
                let codes = std::mem::take(&mut session.collected);
                self.sessions.close(caller);
                if codes.is_empty() {
                    return vec![format::no_codes_provided()];
                }
                self.store_codes(amount, &codes)
            }
        }
    }

    fn upload_extracted(&mut self, amount: Denomination, text: &str) -> Vec<Reply> {
        let codes = extract_codes(text);
        if codes.is_empty() {
            error!(amount, "No valid codes found");
            return vec![format::no_valid_codes()];
        }
        self.store_codes(amount, &codes)
    }

    fn store_codes(&mut self, amount: Denomination, codes: &[String]) -> Vec<Reply> {
        match self.ledger.upload(amount, codes) {
            Ok(outcome) => format::upload(&outcome),
            Err(e) => vec![report(&e)],
        }
    }
}

fn report(error: &LedgerError) -> Reply {
    if !error.is_user_error() {
        error!(error = %error, "Ledger operation failed");
    }
    format::failure(error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BookKind;
    use crate::io::MemoryStore;
    use rust_decimal::Decimal;

    const CODE_A: &str = "BDMB-K-S-00982283 1963-1773-2113-7118";
    const CODE_B: &str = "BDMB-L-S-00422493 4516-7279-2257-5235";

    fn interpreter() -> CommandInterpreter<MemoryStore> {
        CommandInterpreter::new(
            CodeLedger::new(MemoryStore::new()),
            InterpreterConfig::default(),
        )
        .unwrap()
    }

    fn console_interpreter() -> CommandInterpreter<MemoryStore> {
        CommandInterpreter::new(
            CodeLedger::new(MemoryStore::new()),
            InterpreterConfig {
                session_mode: SessionMode::UntilSentinel,
                ..InterpreterConfig::default()
            },
        )
        .unwrap()
    }

    fn texts(replies: Vec<Reply>) -> Vec<String> {
        replies.into_iter().map(|r| r.text).collect()
    }

    fn inventory_len(interp: &CommandInterpreter<MemoryStore>, amount: Denomination) -> usize {
        interp
            .ledger()
            .store()
            .book(BookKind::Inventory)
            .group(amount)
            .map_or(0, |group| group.len())
    }

    #[test]
    fn test_unprefixed_message_is_ignored() {
        let mut interp = interpreter();
        assert!(interp.handle("alice", "hello").is_empty());
    }

    #[test]
    fn test_unknown_command() {
        let mut interp = interpreter();
        assert_eq!(texts(interp.handle("alice", "Jfly")), vec!["Unknown command: fly"]);
    }

    #[test]
    fn test_start_and_help() {
        let mut interp = interpreter();

        let start = texts(interp.handle("alice", "jstart"));
        let help = texts(interp.handle("alice", "JHELP"));

        assert!(start[0].starts_with("Hello!"));
        assert!(help[0].starts_with("Available commands:"));
    }

    #[test]
    fn test_up_raw_tokens() {
        let mut interp = interpreter();

        let replies = texts(interp.handle("alice", "Jup 60 A B A"));

        assert_eq!(
            replies,
            vec!["Duplicate code detected: ```A```", "Added 2 codes for amount: 60"]
        );
        assert_eq!(inventory_len(&interp, 60), 2);
    }

    #[test]
    fn test_up_bulk_extracts_pairs() {
        let mut interp = interpreter();
        let message = format!("Jup 60uc here:\n{}\n{}", CODE_A, CODE_B.replace(' ', "\n"));

        let replies = texts(interp.handle("alice", &message));

        assert_eq!(replies, vec!["Added 2 codes for amount: 60"]);
        let inventory = interp.ledger().store().book(BookKind::Inventory);
        assert!(inventory.group(60).unwrap().contains(CODE_B));
    }

    #[test]
    fn test_up_bulk_without_codes() {
        let mut interp = interpreter();

        let replies = texts(interp.handle("alice", "Jup 60uc nothing here"));

        assert_eq!(replies, vec!["No valid codes found."]);
        assert_eq!(inventory_len(&interp, 60), 0);
    }

    #[test]
    fn test_up_usage_and_validation() {
        let mut interp = interpreter();

        assert!(texts(interp.handle("alice", "Jup 60"))[0].starts_with("Usage: Jup"));
        assert_eq!(
            texts(interp.handle("alice", "Jup sixty A")),
            vec!["Invalid amount format. Please provide a valid number."]
        );
        assert_eq!(
            texts(interp.handle("alice", "Jup 0uc A")),
            vec!["Invalid amount format. Please provide a valid number before 'uc'."]
        );
    }

    #[test]
    fn test_baki_redeems_and_marks_markdown() {
        let mut interp = interpreter();
        interp.handle("alice", "Jup 60 A B C");

        let replies = interp.handle("alice", "Jbaki 60 2");

        assert_eq!(replies, vec![Reply::markdown("A\nB")]);
        assert_eq!(inventory_len(&interp, 60), 1);
    }

    #[test]
    fn test_baki_defaults_to_one() {
        let mut interp = interpreter();
        interp.handle("alice", "Jup 60 A B");

        let replies = texts(interp.handle("alice", "Jbaki 60"));

        assert_eq!(replies, vec!["A"]);
    }

    #[test]
    fn test_baki_stock_out() {
        let mut interp = interpreter();
        interp.handle("alice", "Jup 60 A");

        assert_eq!(texts(interp.handle("alice", "Jbaki 60 2")), vec!["⚠ 60 UC Stock Out ⚠"]);
        assert_eq!(texts(interp.handle("alice", "Jbaki 50")), vec!["⚠ 50 UC Stock Out ⚠"]);
        assert_eq!(inventory_len(&interp, 60), 1);
    }

    #[test]
    fn test_baki_validation() {
        let mut interp = interpreter();

        assert!(texts(interp.handle("alice", "Jbaki"))[0].starts_with("Usage: Jbaki"));
        for message in ["Jbaki x", "Jbaki 60 x", "Jbaki 60 0", "Jbaki 0"] {
            assert_eq!(
                texts(interp.handle("alice", message)),
                vec!["Invalid amount or count."],
                "{}",
                message
            );
        }
    }

    #[test]
    fn test_price_and_rate() {
        let mut interp = interpreter();
        interp.handle("alice", "Jup 60 A");

        let price = texts(interp.handle("alice", "Jprice 60 0.90"));
        let rate = texts(interp.handle("alice", "Jrate"));

        assert_eq!(
            price,
            vec!["✅ Price for 60 UC updated to 0.9 in both stock & used records."]
        );
        assert_eq!(rate, vec!["💰 UC Pricing List:\n\n☞ 60  UC ➪ 0.9"]);
    }

    #[test]
    fn test_price_validation() {
        let mut interp = interpreter();

        assert!(texts(interp.handle("alice", "Jprice 60"))[0].starts_with("Usage: Jprice"));
        assert_eq!(
            texts(interp.handle("alice", "Jprice 60 -2")),
            vec!["Invalid amount or price."]
        );
    }

    #[test]
    fn test_check_and_clear() {
        let mut interp = interpreter();
        interp.handle("alice", "Jup 60 A B");
        interp.handle("alice", "Jprice 60 2");
        interp.handle("alice", "Jbaki 60");

        let check = texts(interp.handle("alice", "Jcheck"));
        let clear = texts(interp.handle("alice", "Jclear"));
        let after = texts(interp.handle("alice", "Jcheck"));

        assert!(check[0].contains("☞ 60  UC ➪ 1 pcs"));
        assert!(check[0].ends_with("☞ Total Due ➪ 2"));
        assert_eq!(clear, vec!["Cleared all dues ✅ ✅."]);
        assert_eq!(after, vec!["No dues available, All clear ✅✅✅."]);
    }

    #[test]
    fn test_write_failure_is_reported_not_swallowed() {
        let mut interp = interpreter();
        interp.handle("alice", "Jup 60 A");
        interp
            .ledger
            .store_mut()
            .fail_writes_to(BookKind::Used.file_name());

        let replies = texts(interp.handle("alice", "Jbaki 60"));

        assert!(replies[0].starts_with("⚠ Failed to save used.json"));
        assert_eq!(inventory_len(&interp, 60), 1);
    }

    #[test]
    fn test_load_next_message_session() {
        let mut interp = interpreter();

        let prompt = texts(interp.handle("alice", "Jload 60"));
        // Another caller is unaffected
        let other = interp.handle("bob", "just chatting");
        let added = texts(interp.handle("alice", &format!("{}\n{}", CODE_A, CODE_B)));

        assert_eq!(prompt, vec!["Upload codes for 60 UC:"]);
        assert!(other.is_empty());
        assert_eq!(added, vec!["Added 2 codes for amount: 60"]);
        assert!(!interp.has_session("alice"));
    }

    #[test]
    fn test_load_next_message_without_codes_closes_session() {
        let mut interp = interpreter();
        interp.handle("alice", "Jload 60");

        let replies = texts(interp.handle("alice", "oops"));

        assert_eq!(replies, vec!["No valid codes found."]);
        assert!(!interp.has_session("alice"));
    }

    #[test]
    fn test_command_cancels_session() {
        let mut interp = interpreter();
        interp.handle("alice", "Jload 60");

        let replies = texts(interp.handle("alice", "Jstock"));

        assert_eq!(replies, vec!["No codes available."]);
        assert!(!interp.has_session("alice"));
    }

    #[test]
    fn test_expired_session_is_ignored() {
        let mut interp = interpreter();
        let start = Instant::now();
        interp.handle_at("alice", "Jload 60", start);

        let later = start + DEFAULT_SESSION_TIMEOUT + Duration::from_secs(1);
        let replies = interp.handle_at("alice", CODE_A, later);

        assert!(replies.is_empty());
        assert_eq!(inventory_len(&interp, 60), 0);
    }

    #[test]
    fn test_load_until_sentinel_session() {
        let mut interp = console_interpreter();

        let prompt = texts(interp.handle("console", "Jload 60"));
        assert!(interp.handle("console", " X1 ").is_empty());
        assert!(interp.handle("console", "").is_empty());
        assert!(interp.handle("console", "X2").is_empty());
        let done = texts(interp.handle("console", "DONE"));

        assert_eq!(
            prompt,
            vec!["Upload codes for 60 UC (one per line, 'done' to finish):"]
        );
        assert_eq!(done, vec!["Added 2 codes for amount: 60"]);
        let inventory = interp.ledger().store().book(BookKind::Inventory);
        assert!(inventory.group(60).unwrap().contains("X1"));
    }

    #[test]
    fn test_load_until_sentinel_without_codes() {
        let mut interp = console_interpreter();
        interp.handle("console", "Jload 60");

        assert_eq!(texts(interp.handle("console", "done")), vec!["No codes provided."]);
        assert_eq!(inventory_len(&interp, 60), 0);
    }

    #[test]
    fn test_command_saves_codes_collected_so_far() {
        let mut interp = console_interpreter();
        interp.handle("console", "Jload 60");
        interp.handle("console", "X1");
        interp.handle("console", "X2");

        let replies = texts(interp.handle("console", "Jstock"));

        assert_eq!(replies[0], "Upload for 60 UC cancelled, saving 2 collected codes.");
        assert_eq!(replies[1], "Added 2 codes for amount: 60");
        assert!(replies[2].contains("☞ 60  UC ➪ 2 pcs"));
        assert!(!interp.has_session("console"));
    }

    #[test]
    fn test_command_after_empty_session_has_no_notice() {
        let mut interp = console_interpreter();
        interp.handle("console", "Jload 60");

        let replies = texts(interp.handle("console", "Jstock"));

        assert_eq!(replies, vec!["No codes available."]);
    }

    #[rstest::rstest]
    #[case::code_line("X3", 3)]
    #[case::done_line("done", 2)]
    fn test_expired_session_saves_collected_codes(#[case] line: &str, #[case] saved: usize) {
        let mut interp = console_interpreter();
        let start = Instant::now();
        interp.handle_at("console", "Jload 60", start);
        interp.handle_at("console", "X1", start + Duration::from_secs(10));
        interp.handle_at("console", "X2", start + Duration::from_secs(20));

        let later = start + DEFAULT_SESSION_TIMEOUT + Duration::from_secs(30);
        let replies = texts(interp.handle_at("console", line, later));

        assert_eq!(
            replies,
            vec![
                format!("Upload for 60 UC expired, saving {saved} collected codes."),
                format!("Added {saved} codes for amount: 60"),
            ]
        );
        assert_eq!(inventory_len(&interp, 60), saved);
        assert!(!interp.has_session("console"));
    }

    #[test]
    fn test_expired_session_then_command_runs_command() {
        let mut interp = console_interpreter();
        let start = Instant::now();
        interp.handle_at("console", "Jload 60", start);
        interp.handle_at("console", "X1", start);

        let later = start + DEFAULT_SESSION_TIMEOUT + Duration::from_secs(1);
        let replies = texts(interp.handle_at("console", "Jstock", later));

        assert_eq!(replies[0], "Upload for 60 UC expired, saving 1 collected codes.");
        assert_eq!(replies[1], "Added 1 codes for amount: 60");
        assert!(replies[2].contains("☞ 60  UC ➪ 1 pcs"));
    }

    #[test]
    fn test_expired_session_of_other_caller_is_saved() {
        let mut interp = console_interpreter();
        let start = Instant::now();
        interp.handle_at("bob", "Jload 60", start);
        interp.handle_at("bob", "X1", start);

        let later = start + DEFAULT_SESSION_TIMEOUT + Duration::from_secs(1);
        let replies = interp.handle_at("alice", "hello", later);

        assert!(replies.is_empty());
        assert_eq!(inventory_len(&interp, 60), 1);
    }

    #[test]
    fn test_load_validation() {
        let mut interp = interpreter();

        assert_eq!(texts(interp.handle("alice", "Jload")), vec!["Usage: Jload <amount>"]);
        assert_eq!(
            texts(interp.handle("alice", "Jload lots")),
            vec!["Invalid amount format. Please provide a valid number."]
        );
        assert!(!interp.has_session("alice"));
    }

    #[test]
    fn test_stock_reports_worth() {
        let mut interp = interpreter();
        interp.handle("alice", "Jup 36 A");
        interp.handle("alice", "Jprice 36 4.5");

        let replies = texts(interp.handle("alice", "Jstock"));

        assert!(replies[0].contains("☞ 36  UC ➪ 1 pcs"));
        assert!(replies[0].ends_with("Worth Of: 4.5"));
        assert_eq!(
            interp.ledger().due_balance().unwrap().total_due,
            Decimal::ZERO
        );
    }
}
