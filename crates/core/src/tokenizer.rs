//! Line tokenizer for OXTest
//!
//! Splits one source line into typed tokens. The tokenizer never fails:
//! fields it does not recognise are dropped so that noisy generated input
//! still yields whatever it can, and every correctness judgement is left
//! to the parser.

use tracing::trace;

use crate::types::SelectorStrategy;

/// Literal that links the following selector field as a fallback
const FALLBACK_KEYWORD: &str = "fallback";

/// Prefix of the single-field fallback form (`fallback=text=Login`)
const FALLBACK_PREFIX: &str = "fallback=";

/// Legacy snake_case command names and their canonical spelling
const ALIASES: &[(&str, &str)] = &[
    ("assert_exists", "assertVisible"),
    ("assert_not_exists", "assertHidden"),
    ("assert_visible", "assertVisible"),
    ("assert_hidden", "assertHidden"),
    ("assert_text", "assertText"),
    ("assert_value", "assertValue"),
    ("assert_enabled", "assertEnabled"),
    ("assert_disabled", "assertDisabled"),
    ("assert_checked", "assertChecked"),
    ("assert_unchecked", "assertUnchecked"),
    ("assert_url", "assertUrl"),
    ("assert_title", "assertTitle"),
    ("assert_count", "assertCount"),
    ("wait_navigation", "wait"),
    ("wait_for", "waitForSelector"),
    ("wait_for_selector", "waitForSelector"),
    ("go_back", "goBack"),
    ("go_forward", "goForward"),
    ("select_option", "selectOption"),
    ("set_viewport", "setViewport"),
    ("double_click", "dblclick"),
];

/// A selector field, optionally linked to the selector written after it
/// with `fallback`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorToken {
    pub strategy: SelectorStrategy,
    pub value: String,
    pub fallback: Option<Box<SelectorToken>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Command name, already passed through the alias table
    Command(String),
    Selector(SelectorToken),
    Param { key: String, value: String },
}

/// Map a legacy command spelling to its canonical name.
///
/// Names missing from the table come back unchanged.
pub fn resolve_alias(name: &str) -> &str {
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(name)
}

/// Tokenize one line. Blank lines and `#` comments produce no tokens.
pub fn tokenize(line: &str) -> Vec<Token> {
    let trimmed = trim_unescaped_end(line.trim_start());
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Vec::new();
    }

    let fields = split_fields(trimmed);
    let Some((name, rest)) = fields.split_first() else {
        return Vec::new();
    };

    let mut tokens = vec![Token::Command(resolve_alias(name).to_string())];
    let mut pos = 0;

    while pos < rest.len() {
        let field = &rest[pos];
        pos += 1;

        if let Some(primary) = parse_selector(field) {
            let (chain, consumed) = collect_fallbacks(&rest[pos..]);
            pos += consumed;
            tokens.push(Token::Selector(link_fallbacks(primary, chain)));
            continue;
        }

        match field.split_once('=') {
            Some((key, value)) if !key.is_empty() => tokens.push(Token::Param {
                key: key.to_string(),
                value: value.to_string(),
            }),
            _ => trace!(field = %field, "ignoring unrecognised field"),
        }
    }

    tokens
}

/// Strip trailing whitespace, keeping a whitespace character that a
/// backslash escapes
fn trim_unescaped_end(line: &str) -> &str {
    let trimmed = line.trim_end();
    let backslashes = trimmed.chars().rev().take_while(|c| *c == '\\').count();
    if backslashes % 2 == 0 {
        return trimmed;
    }
    match line[trimmed.len()..].chars().next() {
        Some(escaped) => &line[..trimmed.len() + escaped.len_utf8()],
        None => trimmed,
    }
}

/// Split a line on ASCII spaces, honouring quotes and backslash escapes.
///
/// A `'` or `"` opens a quoted run that only the same character closes;
/// inside it spaces are literal. Quote characters themselves are dropped.
/// A backslash makes the next character literal and is itself dropped.
/// An unterminated quote runs to the end of the line.
pub fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    // Set once the field has content or an explicit (possibly empty) quote
    let mut in_field = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                in_field = true;
                match chars.next() {
                    Some(escaped) => current.push(escaped),
                    None => current.push('\\'),
                }
            }
            '"' | '\'' if quote.is_none() => {
                quote = Some(c);
                in_field = true;
            }
            c if quote == Some(c) => quote = None,
            ' ' if quote.is_none() => {
                if in_field {
                    fields.push(std::mem::take(&mut current));
                    in_field = false;
                }
            }
            _ => {
                current.push(c);
                in_field = true;
            }
        }
    }

    if in_field {
        fields.push(current);
    }
    fields
}

fn parse_selector(field: &str) -> Option<SelectorToken> {
    let (strategy, value) = field.split_once('=')?;
    let strategy = strategy.parse::<SelectorStrategy>().ok()?;
    Some(SelectorToken {
        strategy,
        value: value.to_string(),
        fallback: None,
    })
}

/// Read consecutive fallback notations following a selector.
///
/// Returns the fallback selectors in written order and how many fields
/// they used.
fn collect_fallbacks(fields: &[String]) -> (Vec<SelectorToken>, usize) {
    let mut chain = Vec::new();
    let mut pos = 0;

    while let Some(field) = fields.get(pos) {
        if field == FALLBACK_KEYWORD {
            match fields.get(pos + 1).and_then(|next| parse_selector(next)) {
                Some(selector) => {
                    chain.push(selector);
                    pos += 2;
                }
                None => break,
            }
        } else {
            match field
                .strip_prefix(FALLBACK_PREFIX)
                .and_then(parse_selector)
            {
                Some(selector) => {
                    chain.push(selector);
                    pos += 1;
                }
                None => break,
            }
        }
    }

    (chain, pos)
}

fn link_fallbacks(mut primary: SelectorToken, chain: Vec<SelectorToken>) -> SelectorToken {
    primary.fallback = chain
        .into_iter()
        .rev()
        .fold(None, |next, mut selector| {
            selector.fallback = next;
            Some(Box::new(selector))
        });
    primary
}
