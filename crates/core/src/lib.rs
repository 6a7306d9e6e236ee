//! OXTest language core
//!
//! OXTest is a line-oriented command language for browser automation steps
//! (click, fill, assert, ...) written by people or generated by an upstream
//! model. This crate is its front end:
//!
//! - [`tokenizer`] splits a line into typed [`Token`]s. It is tolerant and
//!   never fails; unknown fields are dropped.
//! - [`parser`] turns tokens into a validated [`Command`], enforcing the
//!   selector and parameter requirements of each [`CommandType`] and
//!   flattening selector fallback chains.
//! - [`script`] drives both over a whole file with a caller-chosen
//!   [`ErrorPolicy`].
//! - [`format`] renders commands back into canonical OXTest lines.
//!
//! ```text
//! line ──tokenize──▶ Vec<Token> ──parse(tokens, line)──▶ Command ──▶ executor
//! ```
//!
//! Everything here is pure and keeps no state between lines, so lines may
//! be parsed in any order or in parallel.

pub mod error;
pub mod format;
pub mod parser;
pub mod script;
pub mod tokenizer;
pub mod types;

pub use error::{Error, ParseError, Result};
pub use format::format_script;
pub use parser::{parse, parse_line};
pub use script::{load_script, parse_script, ErrorPolicy, Script, Step};
pub use tokenizer::{tokenize, SelectorToken, Token};
pub use types::{Command, CommandType, SelectorSpec, SelectorStrategy};

/// OXTest core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
