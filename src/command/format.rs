//! Reply formatting
//!
//! Turns ledger results into the text sent back to the caller. All functions
//! are pure so replies can be checked without a transport.

use crate::core::{PriceEntry, Redemption, Summary, UploadOutcome};
use crate::types::{Denomination, DueBalance, LedgerError};
use rust_decimal::Decimal;

/// Characters that must be escaped in Telegram MarkdownV2 text
const MARKDOWN_V2_SPECIAL: &str = "_*[]()~`>#+-=|{}.!";

const RULE: &str = "▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔▔";

/// Opens and closes a preformatted block in MarkdownV2
const CODE_FENCE: &str = "```";

/// One message to send back to the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Plain text of the reply
    pub text: String,
    /// Whether chat transports should send it as MarkdownV2
    pub markdown: bool,
}

impl Reply {
    pub fn plain(text: impl Into<String>) -> Self {
        Reply {
            text: text.into(),
            markdown: false,
        }
    }

    pub fn markdown(text: impl Into<String>) -> Self {
        Reply {
            text: text.into(),
            markdown: true,
        }
    }

    /// Text rendered for MarkdownV2
    ///
    /// Text between ``` fences is kept as a preformatted block; everything
    /// else is escaped. Unbalanced fences are escaped like any other text.
    pub fn markdown_v2(&self) -> String {
        let segments: Vec<&str> = self.text.split(CODE_FENCE).collect();
        if segments.len() % 2 == 0 {
            return escape_markdown_v2(&self.text);
        }

        let mut rendered = String::with_capacity(self.text.len());
        for (i, segment) in segments.iter().enumerate() {
            if i % 2 == 1 {
                rendered.push_str(CODE_FENCE);
                rendered.push_str(&escape_preformatted(segment));
                rendered.push_str(CODE_FENCE);
            } else {
                rendered.push_str(&escape_markdown_v2(segment));
            }
        }
        rendered
    }
}

/// Escape every MarkdownV2 special character with a backslash
pub fn escape_markdown_v2(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if MARKDOWN_V2_SPECIAL.contains(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

// Inside a preformatted block only backslash and backtick need escaping
fn escape_preformatted(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '\\' || c == '`' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn money(value: Decimal) -> String {
    value.normalize().to_string()
}

pub fn greeting(prefix: &str) -> Reply {
    Reply::plain(format!(
        "Hello! I'm your UC bot. Use {prefix}help to see available commands."
    ))
}

pub fn help(prefix: &str) -> Reply {
    let p = prefix;
    Reply::plain(format!(
        "Available commands:
{p}start - Start the bot
{p}help - Show this help message
{p}baki <amount> [count] - Retrieve UC codes
{p}price <amount> <price> - Set price for UC
{p}stock - Show available stock
{p}check - Check removed codes
{p}rate - Show UC prices
{p}clear - Clear all used codes and reset dues
{p}up <amount> <code1> [<code2> ...] - Upload new codes
{p}up <amount>uc <pasted codes> - Upload up to 10 pasted codes
{p}load <amount> - Load new codes for a specific amount"
    ))
}

pub fn price_list(entries: impl Iterator<Item = PriceEntry>) -> Reply {
    let lines: Vec<String> = entries
        .map(|entry| format!("☞ {:<3} UC ➪ {}", entry.amount, money(entry.price)))
        .collect();

    if lines.is_empty() {
        return Reply::plain("No pricing data available.");
    }
    Reply::plain(format!("💰 UC Pricing List:\n\n{}", lines.join("\n")))
}

pub fn stock(summary: &Summary) -> Reply {
    if summary.is_empty() {
        return Reply::plain("No codes available.");
    }

    let mut text = String::from("💰 Stock Available:\n\n");
    for line in &summary.lines {
        text.push_str(&format!("☞ {:<3} UC ➪ {} pcs\n", line.amount, line.count));
    }
    text.push_str(&format!("\n{RULE}\nWorth Of: {}", money(summary.total)));
    Reply::plain(text)
}

/// Used-code summary; shows the running balance too when it has drifted
pub fn dues(summary: &Summary, balance: &DueBalance) -> Reply {
    if summary.is_empty() && balance.total_due.is_zero() {
        return Reply::plain("No dues available, All clear ✅✅✅.");
    }

    let mut text = String::from("💰 Used Codes Summary:\n\n");
    for line in &summary.lines {
        text.push_str(&format!("☞ {:<3} UC ➪ {} pcs\n", line.amount, line.count));
    }
    text.push_str(&format!("\n{RULE}\n☞ Total Due ➪ {}", money(summary.total)));
    if balance.total_due != summary.total {
        text.push_str(&format!("\n☞ Running Balance ➪ {}", money(balance.total_due)));
    }
    Reply::plain(text)
}

pub fn cleared() -> Reply {
    Reply::plain("Cleared all dues ✅ ✅.")
}

/// Duplicate warnings (one per duplicate) followed by the added count
pub fn upload(outcome: &UploadOutcome) -> Vec<Reply> {
    let mut replies: Vec<Reply> = outcome
        .duplicates
        .iter()
        .map(|code| {
            Reply::markdown(format!(
                "Duplicate code detected: {CODE_FENCE}{code}{CODE_FENCE}"
            ))
        })
        .collect();
    replies.push(Reply::plain(format!(
        "Added {} codes for amount: {}",
        outcome.added, outcome.amount
    )));
    replies
}

pub fn redeemed(redemption: &Redemption) -> Reply {
    Reply::markdown(redemption.codes.join("\n"))
}

pub fn stock_out(amount: Denomination) -> Reply {
    Reply::plain(format!("⚠ {amount} UC Stock Out ⚠"))
}

pub fn price_updated(amount: Denomination, price: Decimal) -> Reply {
    Reply::plain(format!(
        "✅ Price for {amount} UC updated to {} in both stock & used records.",
        money(price)
    ))
}

pub fn upload_prompt(amount: Denomination, until_sentinel: bool) -> Reply {
    if until_sentinel {
        Reply::plain(format!(
            "Upload codes for {amount} UC (one per line, 'done' to finish):"
        ))
    } else {
        Reply::plain(format!("Upload codes for {amount} UC:"))
    }
}

/// Notice for a one-per-line upload that ended without `done`
pub fn unfinished_upload(amount: Denomination, collected: usize, expired: bool) -> Reply {
    let how = if expired { "expired" } else { "cancelled" };
    Reply::plain(format!(
        "Upload for {amount} UC {how}, saving {collected} collected codes."
    ))
}

pub fn no_valid_codes() -> Reply {
    Reply::plain("No valid codes found.")
}

pub fn no_codes_provided() -> Reply {
    Reply::plain("No codes provided.")
}

pub fn unknown(verb: &str) -> Reply {
    Reply::plain(format!("Unknown command: {verb}"))
}

/// Failure that is not the caller's fault
pub fn failure(error: &LedgerError) -> Reply {
    Reply::plain(format!("⚠ {error}"))
}
