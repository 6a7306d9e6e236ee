//! Whole-script parsing
//!
//! Lines are parsed independently. What happens after a line fails is the
//! caller's choice, expressed as an [`ErrorPolicy`].

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{ParseError, Result};
use crate::parser::parse_line;
use crate::types::Command;

/// What to do when a line fails to parse
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Stop at the first bad line
    #[default]
    Abort,
    /// Record the error and keep going
    Skip,
}

/// A parsed command and the line it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    pub line: usize,
    pub command: Command,
}

/// The result of parsing a script
#[derive(Debug, Clone, Default, Serialize)]
pub struct Script {
    pub steps: Vec<Step>,
    /// Lines rejected under [`ErrorPolicy::Skip`]
    #[serde(skip)]
    pub errors: Vec<ParseError>,
}

impl Script {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// True when no line was rejected
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.steps.iter().map(|step| &step.command)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Parse every line of `source`.
///
/// Under [`ErrorPolicy::Abort`] the first failing line is returned as the
/// error. Under [`ErrorPolicy::Skip`] failures are collected in
/// [`Script::errors`] and parsing continues with the next line.
pub fn parse_script(source: &str, policy: ErrorPolicy) -> std::result::Result<Script, ParseError> {
    let mut script = Script::default();

    for (index, raw) in source.lines().enumerate() {
        let line = index + 1;
        match parse_line(raw, line) {
            Ok(Some(command)) => script.steps.push(Step { line, command }),
            Ok(None) => {}
            Err(err) => match policy {
                ErrorPolicy::Abort => return Err(err),
                ErrorPolicy::Skip => {
                    warn!(line, error = %err, "skipping line");
                    script.errors.push(err);
                }
            },
        }
    }

    debug!(
        steps = script.steps.len(),
        errors = script.errors.len(),
        "parsed script"
    );
    Ok(script)
}

/// Read and parse a script file
pub fn load_script(path: &Path, policy: ErrorPolicy) -> Result<Script> {
    debug!("Loading script {}", path.display());
    let content = std::fs::read_to_string(path)?;
    Ok(parse_script(&content, policy)?)
}
