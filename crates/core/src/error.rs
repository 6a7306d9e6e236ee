//! Error types for OXTest parsing

use thiserror::Error;

use crate::types::CommandType;

/// Result type alias using the OXTest [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// A fatal error raised while parsing one OXTest line.
///
/// Every variant carries the 1-based source line number. The tokenizer
/// never produces these; all of them come from the command parser.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: empty token stream")]
    EmptyTokens { line: usize },

    #[error("line {line}: first token is not a command")]
    MissingCommandToken { line: usize },

    #[error("line {line}: unknown command: {name}")]
    UnknownCommand { line: usize, name: String },

    #[error("line {line}: {command} requires a selector")]
    MissingSelector { line: usize, command: CommandType },

    #[error("line {line}: missing required parameter: {param}")]
    MissingParameter {
        line: usize,
        command: CommandType,
        param: &'static str,
    },
}

impl ParseError {
    /// The 1-based line the error was raised for
    pub fn line(&self) -> usize {
        match self {
            ParseError::EmptyTokens { line }
            | ParseError::MissingCommandToken { line }
            | ParseError::UnknownCommand { line, .. }
            | ParseError::MissingSelector { line, .. }
            | ParseError::MissingParameter { line, .. } => *line,
        }
    }
}

/// OXTest error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
