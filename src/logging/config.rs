use crate::logging::layers::console::ConsoleOutput;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use tracing_subscriber::filter::Directive;

const DEFAULT_LEVEL: &str = "info";

/// `[logging]` section of fslwrap.toml.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub default_level: String,

    #[serde(default)]
    pub console_output: ConsoleOutput,

    #[serde(default)]
    pub enable_file: bool,

    /// Directory for fslwrap.log; defaults to the user data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default_level: default_level(),
            console_output: ConsoleOutput::default(),
            enable_file: false,
            log_dir: None,
        }
    }
}

fn default_level() -> String {
    DEFAULT_LEVEL.to_string()
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<()> {
        Directive::from_str(&self.default_level)
            .map_err(|_| anyhow!("logging.default_level must be a valid tracing directive"))?;

        if let Some(dir) = &self.log_dir {
            if dir.as_os_str().is_empty() {
                return Err(anyhow!("logging.log_dir cannot be empty when set"));
            }
        }

        Ok(())
    }

    /// Level used when `RUST_LOG` is unset.
    pub fn effective_level(&self, verbose: bool) -> &str {
        if verbose {
            "debug"
        } else {
            &self.default_level
        }
    }
}
