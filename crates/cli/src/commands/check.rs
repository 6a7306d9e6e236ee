//! Check Command
//!
//! Parses scripts and reports every rejected line.

use anyhow::{Context, Result};
use clap::Args;
use oxtest_core::{parse_script, ErrorPolicy};
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

use crate::output::{print_error, print_list, print_success, OutputFormat, TableDisplay};

#[derive(Args)]
pub struct CheckArgs {
    /// Script files to check
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

/// A rejected line
#[derive(Serialize)]
pub struct Issue {
    pub file: String,
    pub line: usize,
    pub message: String,
}

impl TableDisplay for Issue {
    fn headers() -> Vec<&'static str> {
        vec!["File", "Line", "Error"]
    }

    fn row(&self) -> Vec<String> {
        vec![self.file.clone(), self.line.to_string(), self.message.clone()]
    }
}

/// Returns `true` when every file parsed cleanly
pub fn execute(args: CheckArgs, format: OutputFormat) -> Result<bool> {
    let mut issues = Vec::new();
    let mut commands = 0;

    for path in &args.files {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let script = parse_script(&source, ErrorPolicy::Skip)?;
        debug!(file = %path.display(), steps = script.len(), errors = script.errors.len(), "checked");

        commands += script.len();
        issues.extend(script.errors.iter().map(|err| Issue {
            file: path.display().to_string(),
            line: err.line(),
            message: err.to_string(),
        }));
    }

    match format {
        OutputFormat::Table | OutputFormat::Plain => {
            for issue in &issues {
                print_error(&format!("{}:{}", issue.file, issue.message));
            }
            if issues.is_empty() {
                print_success(&format!(
                    "{} file(s), {} command(s), no errors",
                    args.files.len(),
                    commands
                ));
            }
        }
        OutputFormat::Json | OutputFormat::Yaml => print_list(&issues, format),
    }

    Ok(issues.is_empty())
}
