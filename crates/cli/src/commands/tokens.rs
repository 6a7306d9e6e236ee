//! Tokens Command
//!
//! Shows how the tokenizer splits a single line.

use anyhow::Result;
use clap::Args;
use oxtest_core::{tokenize, SelectorToken, Token};
use serde::Serialize;

use crate::output::{print_list, OutputFormat, TableDisplay};

#[derive(Args)]
pub struct TokensArgs {
    /// The OXTest line to tokenize
    pub line: String,
}

#[derive(Serialize)]
pub struct TokenDisplay {
    pub kind: &'static str,
    pub value: String,
}

fn selector_chain(selector: &SelectorToken) -> String {
    let mut parts = vec![format!("{}={}", selector.strategy, selector.value)];
    let mut next = selector.fallback.as_deref();
    while let Some(fallback) = next {
        parts.push(format!("{}={}", fallback.strategy, fallback.value));
        next = fallback.fallback.as_deref();
    }
    parts.join(" -> ")
}

impl From<&Token> for TokenDisplay {
    fn from(token: &Token) -> Self {
        match token {
            Token::Command(name) => Self {
                kind: "command",
                value: name.clone(),
            },
            Token::Selector(selector) => Self {
                kind: "selector",
                value: selector_chain(selector),
            },
            Token::Param { key, value } => Self {
                kind: "param",
                value: format!("{}={}", key, value),
            },
        }
    }
}

impl TableDisplay for TokenDisplay {
    fn headers() -> Vec<&'static str> {
        vec!["Kind", "Value"]
    }

    fn row(&self) -> Vec<String> {
        vec![self.kind.to_string(), self.value.clone()]
    }
}

pub fn execute(args: TokensArgs, format: OutputFormat) -> Result<()> {
    let tokens: Vec<TokenDisplay> = tokenize(&args.line).iter().map(TokenDisplay::from).collect();
    print_list(&tokens, format);
    Ok(())
}
