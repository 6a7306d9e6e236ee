//! Fmt Command
//!
//! Rewrites scripts with canonical command names and quoting.

use anyhow::{Context, Result};
use clap::Args;
use oxtest_core::format_script;
use std::path::PathBuf;
use tracing::info;

use crate::output::print_error;

#[derive(Args)]
pub struct FmtArgs {
    /// Script file to format
    pub file: PathBuf,

    /// Write the result back to the file
    #[arg(short, long, conflicts_with = "check")]
    pub write: bool,

    /// Exit non-zero if the file is not already formatted
    #[arg(long)]
    pub check: bool,
}

/// Returns `false` only for `--check` on a file that would change
pub fn execute(args: FmtArgs) -> Result<bool> {
    let source = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let formatted = format_script(&source);

    if args.check {
        if formatted != source {
            print_error(&format!("{} is not formatted", args.file.display()));
            return Ok(false);
        }
        return Ok(true);
    }

    if args.write {
        if formatted != source {
            std::fs::write(&args.file, &formatted)
                .with_context(|| format!("Failed to write {}", args.file.display()))?;
            info!("Formatted {}", args.file.display());
        }
    } else {
        print!("{}", formatted);
    }

    Ok(true)
}
