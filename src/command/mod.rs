//! Chat command layer
//!
//! - `parser` - Prefix and verb recognition, argument parsing
//! - `extract` - Serial + pin extraction from pasted text
//! - `format` - Reply text for every ledger result
//! - `interpreter` - Message dispatch and upload sessions

pub mod extract;
pub mod format;
pub mod interpreter;
pub mod parser;

pub use extract::{extract_codes, MAX_CODES_PER_MESSAGE};
pub use format::{escape_markdown_v2, Reply};
pub use interpreter::{CommandInterpreter, InterpreterConfig, DONE_SENTINEL};
pub use parser::{CommandParser, ParsedCommand, Verb};
