pub mod loader;
pub mod validation;

pub use loader::ConfigLoader;
pub use validation::ConfigValidator;

use crate::logging::config::LoggingConfig;
use crate::tools::environment::{DEFAULT_FSL_CONFIG, DEFAULT_SHELL};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration loaded from fslwrap.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    /// How FSL is located and invoked
    #[serde(default)]
    pub fsl: FslSettings,

    /// Logging sinks and level
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// `[fsl]` section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FslSettings {
    /// Shell script that exports FSLDIR, PATH and friends
    #[serde(default = "default_fslconfig")]
    pub fslconfig: PathBuf,

    /// Shell used to source `fslconfig`
    #[serde(default = "default_shell")]
    pub shell: String,

    /// Required FSL release prefix, checked against $FSLDIR/etc/fslversion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release: Option<String>,

    /// Fail when a helper's output file is missing after a zero exit
    #[serde(default)]
    pub verify_outputs: bool,
}

impl Default for FslSettings {
    fn default() -> Self {
        Self {
            fslconfig: default_fslconfig(),
            shell: default_shell(),
            release: None,
            verify_outputs: false,
        }
    }
}

fn default_fslconfig() -> PathBuf {
    PathBuf::from(DEFAULT_FSL_CONFIG)
}

fn default_shell() -> String {
    DEFAULT_SHELL.to_string()
}
