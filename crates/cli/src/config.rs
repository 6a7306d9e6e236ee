//! CLI configuration

use oxtest_core::ErrorPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::output::OutputFormat;

/// Default configuration file, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "oxtest.toml";

/// Settings read from `oxtest.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OxtestConfig {
    /// What `parse` does when a line fails
    pub on_error: ErrorPolicy,

    /// Output format used when `--format` is not given
    pub format: Option<OutputFormat>,
}

impl OxtestConfig {
    /// Load configuration from file, falling back to defaults when absent
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Pick the output format: command line first, then file, then default
    pub fn output_format(&self, flag: Option<OutputFormat>) -> OutputFormat {
        flag.or(self.format).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = OxtestConfig::load(&dir.path().join(DEFAULT_CONFIG_FILE)).unwrap();
        assert_eq!(config, OxtestConfig::default());
        assert_eq!(config.on_error, ErrorPolicy::Abort);
    }

    #[test]
    fn test_load_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "on_error = \"skip\"\nformat = \"json\"\n").unwrap();

        let config = OxtestConfig::load(&path).unwrap();
        assert_eq!(config.on_error, ErrorPolicy::Skip);
        assert_eq!(config.output_format(None), OutputFormat::Json);
        assert_eq!(
            config.output_format(Some(OutputFormat::Plain)),
            OutputFormat::Plain
        );
    }

    #[test]
    fn test_invalid_policy_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "on_error = \"retry\"\n").unwrap();
        assert!(OxtestConfig::load(&path).is_err());
    }
}
