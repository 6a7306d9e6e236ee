//! Command parser: turns a line's tokens into a validated [`Command`]

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::ParseError;
use crate::tokenizer::{tokenize, SelectorToken, Token};
use crate::types::{Command, CommandType, SelectorSpec};

/// Build a [`Command`] from the tokens of one line.
///
/// `line` is the 1-based source line and is only used in errors. The first
/// violated rule is reported: token shape, then command name, then the
/// selector requirement, then required parameters.
pub fn parse(tokens: Vec<Token>, line: usize) -> Result<Command, ParseError> {
    let mut tokens = tokens.into_iter();

    let name = match tokens.next() {
        None => return Err(ParseError::EmptyTokens { line }),
        Some(Token::Command(name)) => name,
        Some(_) => return Err(ParseError::MissingCommandToken { line }),
    };

    let command_type = name
        .parse::<CommandType>()
        .map_err(|_| ParseError::UnknownCommand { line, name })?;

    let mut selector: Option<SelectorSpec> = None;
    let mut params = BTreeMap::new();

    for token in tokens {
        match token {
            Token::Selector(token) if selector.is_none() => {
                selector = Some(build_selector(token));
            }
            Token::Selector(token) => {
                debug!(line, strategy = %token.strategy, value = %token.value, "ignoring extra selector");
            }
            Token::Param { key, value } => {
                params.insert(key, value);
            }
            Token::Command(name) => {
                debug!(line, name = %name, "ignoring stray command token");
            }
        }
    }

    if command_type.requires_selector() && selector.is_none() {
        return Err(ParseError::MissingSelector {
            line,
            command: command_type,
        });
    }

    if let Some(param) = command_type
        .required_params()
        .iter()
        .find(|param| !params.contains_key(**param))
    {
        return Err(ParseError::MissingParameter {
            line,
            command: command_type,
            param: *param,
        });
    }

    Ok(Command::new(command_type, params, selector))
}

/// Tokenize and parse a single line; blank and comment lines give `None`.
pub fn parse_line(source: &str, line: usize) -> Result<Option<Command>, ParseError> {
    let tokens = tokenize(source);
    if tokens.is_empty() {
        return Ok(None);
    }
    parse(tokens, line).map(Some)
}

/// Flatten a linked fallback chain into one ordered list
fn build_selector(token: SelectorToken) -> SelectorSpec {
    let mut spec = SelectorSpec::new(token.strategy, token.value);
    let mut next = token.fallback;

    while let Some(fallback) = next {
        let fallback = *fallback;
        spec.fallbacks
            .push(SelectorSpec::new(fallback.strategy, fallback.value));
        next = fallback.fallback;
    }

    spec
}
