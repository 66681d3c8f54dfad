use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Environment mapping handed to a spawned tool.
pub type EnvMap = HashMap<String, String>;

/// Error category enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCategory {
    ValidationError,
    ToolLookupError,
    ConfigurationError,
    ToolExecutionError,
    IoError,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Whether helpers check that the requested output exists after a zero exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputPolicy {
    /// Return the requested path without looking at the filesystem.
    #[default]
    Trust,
    /// Fail with `MissingOutput` when the path is absent.
    Verify,
}

/// One spawn-and-wait request against an external program.
///
/// `env` replaces the ambient environment of the child when set. `None`
/// inherits the parent environment and is only used while the environment
/// itself is being sourced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub tool: String,
    pub args: Vec<String>,
    pub env: Option<EnvMap>,
}

impl ToolInvocation {
    pub fn new<T, I, A>(tool: T, args: I) -> Self
    where
        T: Into<String>,
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        Self {
            tool: tool.into(),
            args: args.into_iter().map(Into::into).collect(),
            env: None,
        }
    }

    pub fn with_env(mut self, env: EnvMap) -> Self {
        self.env = Some(env);
        self
    }

    /// Full argument vector; the first element is always the program.
    pub fn argv(&self) -> Vec<String> {
        std::iter::once(self.tool.clone())
            .chain(self.args.iter().cloned())
            .collect()
    }

    /// Space-joined rendering used in log lines and error messages.
    pub fn command_line(&self) -> String {
        self.argv().join(" ")
    }
}

/// Captured outcome of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionResult {
    pub stdout: String,
    pub stderr: String,
    /// `-1` when the child was terminated by a signal.
    pub exit_code: i32,
}

impl ExecutionResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}
