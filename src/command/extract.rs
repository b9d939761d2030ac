//! Bulk code extraction from free-form text
//!
//! Pasted voucher lists contain a serial token (`AAAA-B-S-00000001`) followed
//! by a pin token (`1111-2222-3333-4444`). Each serial + pin pair is one
//! code. At most [`MAX_CODES_PER_MESSAGE`] codes are taken from one message.

use regex::Regex;
use std::sync::LazyLock;

/// Upper bound on codes extracted from one message
pub const MAX_CODES_PER_MESSAGE: usize = 10;

static CODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z]{4}-[A-Za-z]-S-[0-9]{8} [0-9]{4}-[0-9]{4}-[0-9]{4}-[0-9]{4}")
        .expect("code pattern is a valid regex")
});

/// Extract serial + pin codes from `text`
///
/// Line breaks are treated as spaces, so a serial and its pin may sit on
/// separate lines. Matches are returned in order of appearance, capped at
/// [`MAX_CODES_PER_MESSAGE`].
pub fn extract_codes(text: &str) -> Vec<String> {
    let flattened = text.replace("\r\n", " ").replace(['\n', '\r'], " ");

    CODE_PATTERN
        .find_iter(&flattened)
        .take(MAX_CODES_PER_MESSAGE)
        .map(|m| m.as_str().to_string())
        .collect()
}
