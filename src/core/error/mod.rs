use crate::core::types::ErrorCategory;
use std::path::PathBuf;
use thiserror::Error;

/// Every failure the invoker and the helpers can report.
#[derive(Debug, Error)]
pub enum FslError {
    #[error("input file '{}' does not exist", path.display())]
    InvalidInput { path: PathBuf },

    #[error("tool '{tool}' was not found in the configured environment")]
    MissingTool { tool: String },

    #[error("configuration error ({}): {message}", display_source(.script))]
    Configuration {
        script: Option<PathBuf>,
        message: String,
    },

    #[error("'{tool}' exited with code {exit_code}: {}", .stderr.trim())]
    Execution {
        tool: String,
        exit_code: i32,
        stderr: String,
    },

    #[error("failed to launch '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{tool}' succeeded but did not produce '{}'", path.display())]
    MissingOutput { tool: String, path: PathBuf },
}

fn display_source(script: &Option<PathBuf>) -> String {
    script
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "environment".to_string())
}

impl FslError {
    pub fn configuration<T: Into<String>>(script: Option<PathBuf>, message: T) -> Self {
        FslError::Configuration {
            script,
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            FslError::InvalidInput { .. } => ErrorCategory::ValidationError,
            FslError::MissingTool { .. } => ErrorCategory::ToolLookupError,
            FslError::Configuration { .. } => ErrorCategory::ConfigurationError,
            FslError::Execution { .. } => ErrorCategory::ToolExecutionError,
            FslError::Launch { .. } => ErrorCategory::IoError,
            FslError::MissingOutput { .. } => ErrorCategory::ToolExecutionError,
        }
    }

    /// Stable identifier surfaced in logs and on the command line.
    pub fn code(&self) -> &'static str {
        match self {
            FslError::InvalidInput { .. } => "FSL-INPUT-001",
            FslError::MissingTool { .. } => "FSL-TOOL-001",
            FslError::Configuration { .. } => "FSL-CONF-001",
            FslError::Execution { .. } => "FSL-EXEC-001",
            FslError::Launch { .. } => "FSL-EXEC-002",
            FslError::MissingOutput { .. } => "FSL-OUTPUT-001",
        }
    }

    /// Process exit status used by the binary.
    pub fn exit_code(&self) -> u8 {
        match self {
            FslError::InvalidInput { .. } => 2,
            FslError::MissingTool { .. } => 3,
            FslError::Configuration { .. } => 4,
            FslError::Execution { exit_code, .. } => u8::try_from(*exit_code)
                .ok()
                .filter(|code| *code != 0)
                .unwrap_or(1),
            FslError::Launch { .. } | FslError::MissingOutput { .. } => 1,
        }
    }
}
