//! Prefixed command parsing
//!
//! A command is a message that starts with the configured prefix immediately
//! followed by a verb, e.g. `Jbaki 60 2`. Prefix and verb are matched
//! case-insensitively; the remainder is kept verbatim and split on
//! whitespace into arguments.

use crate::types::{Denomination, LedgerError};
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Verbs understood by the interpreter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Start,
    Help,
    Rate,
    Baki,
    Price,
    Stock,
    Check,
    Clear,
    Up,
    Load,
}

impl Verb {
    /// Look up a lowercase verb
    pub fn parse(verb: &str) -> Option<Verb> {
        let verb = match verb {
            "start" => Verb::Start,
            "help" => Verb::Help,
            "rate" => Verb::Rate,
            "baki" => Verb::Baki,
            "price" => Verb::Price,
            "stock" => Verb::Stock,
            "check" => Verb::Check,
            "clear" => Verb::Clear,
            "up" => Verb::Up,
            "load" => Verb::Load,
            _ => return None,
        };
        Some(verb)
    }
}

/// A message split into verb and arguments
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedCommand {
    /// Lowercased verb as typed
    pub verb: String,
    /// Whitespace-split arguments
    pub args: Vec<String>,
    /// Everything after the verb, verbatim
    pub rest: String,
}

/// Parser for one command prefix
#[derive(Debug, Clone)]
pub struct CommandParser {
    pattern: Regex,
}

impl CommandParser {
    /// Build a parser for `prefix`
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidArgument`] for an empty prefix.
    pub fn new(prefix: &str) -> Result<Self, LedgerError> {
        if prefix.trim().is_empty() {
            return Err(LedgerError::invalid_argument(
                "prefix",
                prefix,
                "must not be empty",
            ));
        }

        let pattern = Regex::new(&format!(r"(?is)^{}(\w+)\s*(.*)$", regex::escape(prefix)))
            .map_err(|e| LedgerError::invalid_argument("prefix", prefix, &e.to_string()))?;

        Ok(Self { pattern })
    }

    /// Parse a message; `None` if it does not start with the prefix
    pub fn parse(&self, message: &str) -> Option<ParsedCommand> {
        let captures = self.pattern.captures(message.trim())?;
        let verb = captures.get(1)?.as_str().to_lowercase();
        let rest = captures
            .get(2)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        let args = rest.split_whitespace().map(str::to_string).collect();

        Some(ParsedCommand { verb, args, rest })
    }
}

/// Parse a denomination argument (positive integer)
pub fn parse_amount(value: &str) -> Result<Denomination, LedgerError> {
    let amount: Denomination = value
        .parse()
        .map_err(|_| LedgerError::invalid_argument("amount", value, "not a number"))?;
    if amount == 0 {
        return Err(LedgerError::invalid_argument(
            "amount",
            value,
            "must be a positive number",
        ));
    }
    Ok(amount)
}

/// Parse a bulk-upload denomination such as `60uc`
pub fn parse_bulk_amount(value: &str) -> Result<Denomination, LedgerError> {
    let number = strip_uc_suffix(value)
        .ok_or_else(|| LedgerError::invalid_argument("amount", value, "missing 'uc' suffix"))?;
    parse_amount(number)
}

/// Whether an amount argument uses the bulk `<n>uc` form
pub fn is_bulk_amount(value: &str) -> bool {
    strip_uc_suffix(value).is_some()
}

fn strip_uc_suffix(value: &str) -> Option<&str> {
    let split = value.len().checked_sub(2)?;
    let (number, suffix) = (value.get(..split)?, value.get(split..)?);
    suffix.eq_ignore_ascii_case("uc").then_some(number)
}

/// Parse a redemption count (positive integer)
pub fn parse_count(value: &str) -> Result<usize, LedgerError> {
    let count: usize = value
        .parse()
        .map_err(|_| LedgerError::invalid_argument("count", value, "not a number"))?;
    if count == 0 {
        return Err(LedgerError::invalid_argument(
            "count",
            value,
            "must be a positive number",
        ));
    }
    Ok(count)
}

/// Parse a price (non-negative decimal)
pub fn parse_price(value: &str) -> Result<Decimal, LedgerError> {
    let price = Decimal::from_str(value)
        .map_err(|_| LedgerError::invalid_argument("price", value, "not a number"))?;
    if price < Decimal::ZERO {
        return Err(LedgerError::invalid_argument(
            "price",
            value,
            "must not be negative",
        ));
    }
    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::bare("Jstock", "stock", &[])]
    #[case::lowercase_prefix("jstock", "stock", &[])]
    #[case::uppercase_verb("JSTOCK", "stock", &[])]
    #[case::with_args("Jbaki 60 2", "baki", &["60", "2"])]
    #[case::extra_spaces("  Jprice   60    4.5  ", "price", &["60", "4.5"])]
    #[case::unknown_verb("Jfoo bar", "foo", &["bar"])]
    #[case::multiline("Jup 60uc A\nB", "up", &["60uc", "A", "B"])]
    fn test_parse_command(#[case] message: &str, #[case] verb: &str, #[case] args: &[&str]) {
        let parser = CommandParser::new("J").unwrap();

        let parsed = parser.parse(message).unwrap();

        assert_eq!(parsed.verb, verb);
        assert_eq!(parsed.args, args);
    }

    #[rstest]
    #[case("stock")]
    #[case("hello there")]
    #[case("J")]
    #[case("")]
    fn test_parse_without_prefix(#[case] message: &str) {
        let parser = CommandParser::new("J").unwrap();
        assert!(parser.parse(message).is_none());
    }

    #[test]
    fn test_parse_keeps_rest_verbatim() {
        let parser = CommandParser::new("J").unwrap();

        let parsed = parser.parse("Jup 60uc AAAA-B-S-00000001\n1111-2222-3333-4444").unwrap();

        assert_eq!(parsed.rest, "60uc AAAA-B-S-00000001\n1111-2222-3333-4444");
    }

    #[test]
    fn test_prefix_is_escaped() {
        let parser = CommandParser::new(".").unwrap();

        assert!(parser.parse(".stock").is_some());
        assert!(parser.parse("xstock").is_none());
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn test_empty_prefix_rejected(#[case] prefix: &str) {
        assert!(matches!(
            CommandParser::new(prefix),
            Err(LedgerError::InvalidArgument { .. })
        ));
    }

    #[rstest]
    #[case("stock", Some(Verb::Stock))]
    #[case("baki", Some(Verb::Baki))]
    #[case("load", Some(Verb::Load))]
    #[case("jload", None)]
    #[case("", None)]
    fn test_verb_parse(#[case] verb: &str, #[case] expected: Option<Verb>) {
        assert_eq!(Verb::parse(verb), expected);
    }

    #[rstest]
    #[case("60", Ok(60))]
    #[case("325", Ok(325))]
    #[case("0", Err(()))]
    #[case("-5", Err(()))]
    #[case("6.5", Err(()))]
    #[case("abc", Err(()))]
    fn test_parse_amount(#[case] value: &str, #[case] expected: Result<Denomination, ()>) {
        assert_eq!(parse_amount(value).map_err(|_| ()), expected);
    }

    #[rstest]
    #[case("60uc", Ok(60))]
    #[case("325UC", Ok(325))]
    #[case("60", Err(()))]
    #[case("uc", Err(()))]
    #[case("xxuc", Err(()))]
    fn test_parse_bulk_amount(#[case] value: &str, #[case] expected: Result<Denomination, ()>) {
        assert_eq!(parse_bulk_amount(value).map_err(|_| ()), expected);
    }

    #[rstest]
    #[case("60uc", true)]
    #[case("60Uc", true)]
    #[case("60", false)]
    #[case("u", false)]
    #[case("ü", false)]
    fn test_is_bulk_amount(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(is_bulk_amount(value), expected);
    }

    #[rstest]
    #[case("1", Ok(1))]
    #[case("10", Ok(10))]
    #[case("0", Err(()))]
    #[case("two", Err(()))]
    fn test_parse_count(#[case] value: &str, #[case] expected: Result<usize, ()>) {
        assert_eq!(parse_count(value).map_err(|_| ()), expected);
    }

    #[rstest]
    #[case("4.5", Ok(Decimal::new(45, 1)))]
    #[case("0", Ok(Decimal::ZERO))]
    #[case("12", Ok(Decimal::new(12, 0)))]
    #[case("-1", Err(()))]
    #[case("cheap", Err(()))]
    fn test_parse_price(#[case] value: &str, #[case] expected: Result<Decimal, ()>) {
        assert_eq!(parse_price(value).map_err(|_| ()), expected);
    }
}
