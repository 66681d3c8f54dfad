use crate::core::error::FslError;
use crate::core::types::{ExecutionResult, ToolInvocation};
use std::process::{Command, Stdio};

/// Spawns one process per invocation and waits for it.
///
/// The invoker never touches `std::process` directly; tests substitute a
/// recording implementation.
pub trait ProcessLauncher: Send + Sync {
    fn launch(&self, invocation: &ToolInvocation) -> Result<ExecutionResult, FslError>;
}

/// Launcher backed by `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLauncher;

impl ProcessLauncher for SystemLauncher {
    fn launch(&self, invocation: &ToolInvocation) -> Result<ExecutionResult, FslError> {
        let mut command = Command::new(&invocation.tool);
        command
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if let Some(env) = &invocation.env {
            command.env_clear().envs(env);
        }

        let output = command.output().map_err(|source| FslError::Launch {
            program: invocation.tool.clone(),
            source,
        })?;

        Ok(ExecutionResult {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code().unwrap_or(-1),
        })
    }
}
