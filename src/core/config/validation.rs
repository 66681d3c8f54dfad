use super::AppConfig;
use anyhow::{anyhow, Result};

pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate configuration rules
    pub fn validate(config: &AppConfig) -> Result<()> {
        if config.fsl.shell.trim().is_empty() {
            return Err(anyhow!("fsl.shell cannot be empty"));
        }

        if config.fsl.fslconfig.as_os_str().is_empty() {
            return Err(anyhow!("fsl.fslconfig cannot be empty"));
        }

        if let Some(release) = &config.fsl.release {
            if release.trim().is_empty() {
                return Err(anyhow!("fsl.release cannot be empty when set"));
            }
        }

        config.logging.validate()?;

        Ok(())
    }
}
