use super::{AppConfig, ConfigValidator};
use anyhow::{anyhow, Context, Result};
use std::env;
use std::path::{Path, PathBuf};

/// File name looked up in the user configuration directory.
pub const CONFIG_FILE_NAME: &str = "fslwrap.toml";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with precedence: defaults, config file, env overrides.
    ///
    /// An explicit path must exist. Without one, `$FSLWRAP_CONFIG` and then
    /// the user config directory are tried; a missing default file means defaults.
    pub fn load(explicit: Option<&Path>) -> Result<AppConfig> {
        let mut config = match explicit {
            Some(path) => Self::load_from_file(path)?
                .ok_or_else(|| anyhow!("config file {} does not exist", path.display()))?,
            None => match Self::default_path() {
                Some(path) => Self::load_from_file(&path)?.unwrap_or_default(),
                None => AppConfig::default(),
            },
        };

        Self::apply_env_overrides(&mut config)?;
        ConfigValidator::validate(&config)?;
        Ok(config)
    }

    /// Load config from specific file path
    /// Returns Ok(None) if file doesn't exist
    pub fn load_from_file(path: &Path) -> Result<Option<AppConfig>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: AppConfig = toml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;

        Ok(Some(config))
    }

    fn default_path() -> Option<PathBuf> {
        if let Ok(path) = env::var("FSLWRAP_CONFIG") {
            if !path.trim().is_empty() {
                return Some(PathBuf::from(path));
            }
        }
        dirs_next::config_dir().map(|dir| dir.join("fslwrap").join(CONFIG_FILE_NAME))
    }

    /// Environment variables take precedence over config file values
    fn apply_env_overrides(config: &mut AppConfig) -> Result<()> {
        if let Ok(fslconfig) = env::var("FSLWRAP_FSLCONFIG") {
            config.fsl.fslconfig = PathBuf::from(fslconfig);
        }

        if let Ok(shell) = env::var("FSLWRAP_SHELL") {
            config.fsl.shell = shell;
        }

        if let Ok(release) = env::var("FSLWRAP_FSL_RELEASE") {
            config.fsl.release = Some(release);
        }

        if let Ok(verify) = env::var("FSLWRAP_VERIFY_OUTPUTS") {
            config.fsl.verify_outputs = verify.trim().parse::<bool>().map_err(|_| {
                anyhow!("FSLWRAP_VERIFY_OUTPUTS must be true or false, got '{}'", verify)
            })?;
        }

        if let Ok(level) = env::var("FSLWRAP_LOG_LEVEL") {
            config.logging.default_level = level;
        }

        Ok(())
    }

    /// Get documentation for supported environment variables
    pub fn env_var_documentation() -> &'static [&'static str] {
        &[
            "FSLWRAP_CONFIG - Path to fslwrap.toml",
            "FSLWRAP_FSLCONFIG - FSL shell configuration script (default: /etc/fsl/5.0/fsl.sh)",
            "FSLWRAP_SHELL - Shell used to source the script (default: bash)",
            "FSLWRAP_FSL_RELEASE - Required FSL release prefix",
            "FSLWRAP_VERIFY_OUTPUTS - true/false, check helper outputs exist",
            "FSLWRAP_LOG_LEVEL - Default tracing level (default: info)",
        ]
    }
}
