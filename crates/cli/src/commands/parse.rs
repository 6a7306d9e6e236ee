//! Parse Command
//!
//! Dumps the commands of a script in the selected output format.

use anyhow::Result;
use clap::Args;
use oxtest_core::{load_script, Command, ErrorPolicy, Step};
use serde::Serialize;
use std::path::PathBuf;

use crate::output::{print_list, print_warning, OutputFormat, TableDisplay};

#[derive(Args)]
pub struct ParseArgs {
    /// Script file to parse
    pub file: PathBuf,

    /// Keep going past lines that fail to parse
    #[arg(long)]
    pub skip_errors: bool,
}

/// Step display wrapper for serialization
#[derive(Serialize)]
pub struct StepDisplay {
    pub line: usize,
    #[serde(flatten)]
    pub command: Command,
}

impl From<&Step> for StepDisplay {
    fn from(step: &Step) -> Self {
        Self {
            line: step.line,
            command: step.command.clone(),
        }
    }
}

impl TableDisplay for StepDisplay {
    fn headers() -> Vec<&'static str> {
        vec!["Line", "Command", "Selector", "Params"]
    }

    fn row(&self) -> Vec<String> {
        let selector = self
            .command
            .selector()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        let params = self
            .command
            .params()
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(" ");

        vec![
            self.line.to_string(),
            self.command.command_type().to_string(),
            selector,
            params,
        ]
    }
}

pub fn execute(args: ParseArgs, policy: ErrorPolicy, format: OutputFormat) -> Result<()> {
    let policy = if args.skip_errors {
        ErrorPolicy::Skip
    } else {
        policy
    };

    let script = load_script(&args.file, policy)?;
    for err in &script.errors {
        print_warning(&format!("skipped {}", err));
    }

    let steps: Vec<StepDisplay> = script.steps.iter().map(StepDisplay::from).collect();
    print_list(&steps, format);
    Ok(())
}
