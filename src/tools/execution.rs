use crate::core::config::FslSettings;
use crate::core::error::FslError;
use crate::core::types::{EnvMap, ExecutionResult, OutputPolicy, ToolInvocation};
use crate::tools::environment::{
    check_release, EnvironmentSource, ShellScriptEnvironment, StaticEnvironment,
    DEFAULT_FSL_CONFIG,
};
use crate::tools::launcher::{ProcessLauncher, SystemLauncher};
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

/// Program used to locate tools inside the configured environment.
const LOOKUP_PROGRAM: &str = "which";

/// Locates and runs FSL tools under an environment resolved once per invoker.
pub struct ToolInvoker {
    source: Arc<dyn EnvironmentSource>,
    launcher: Arc<dyn ProcessLauncher>,
    expected_release: Option<String>,
    output_policy: OutputPolicy,
    env: OnceLock<EnvMap>,
}

impl ToolInvoker {
    /// A supplied `env` wins over `fslconfig`; with neither, the default
    /// FSL configuration script is sourced on first use.
    pub fn new(fslconfig: Option<PathBuf>, env: Option<EnvMap>) -> Self {
        let source: Arc<dyn EnvironmentSource> = match env {
            Some(env) => Arc::new(StaticEnvironment(env)),
            None => Arc::new(ShellScriptEnvironment::new(
                fslconfig.unwrap_or_else(|| PathBuf::from(DEFAULT_FSL_CONFIG)),
            )),
        };
        Self::from_source(source)
    }

    pub fn from_source(source: Arc<dyn EnvironmentSource>) -> Self {
        Self {
            source,
            launcher: Arc::new(SystemLauncher),
            expected_release: None,
            output_policy: OutputPolicy::default(),
            env: OnceLock::new(),
        }
    }

    pub fn from_settings(settings: &FslSettings) -> Self {
        let source =
            ShellScriptEnvironment::new(settings.fslconfig.clone()).with_shell(settings.shell.clone());
        let mut invoker = Self::from_source(Arc::new(source)).with_output_policy(
            if settings.verify_outputs {
                OutputPolicy::Verify
            } else {
                OutputPolicy::Trust
            },
        );
        invoker.expected_release = settings.release.clone();
        invoker
    }

    pub fn with_launcher(mut self, launcher: Arc<dyn ProcessLauncher>) -> Self {
        self.launcher = launcher;
        self
    }

    pub fn with_expected_release<T: Into<String>>(mut self, release: T) -> Self {
        self.expected_release = Some(release.into());
        self
    }

    pub fn with_output_policy(mut self, policy: OutputPolicy) -> Self {
        self.output_policy = policy;
        self
    }

    pub fn output_policy(&self) -> OutputPolicy {
        self.output_policy
    }

    /// Resolve the tool environment, sourcing the configuration on first use.
    pub fn environment(&self) -> Result<&EnvMap, FslError> {
        if let Some(env) = self.env.get() {
            return Ok(env);
        }

        let env = self.source.load(self.launcher.as_ref()).map_err(|err| {
            tracing::warn!(code = err.code(), "failed to resolve FSL environment: {}", err);
            err
        })?;

        if let Some(expected) = &self.expected_release {
            let found = check_release(&env, expected).map_err(|err| match err {
                FslError::Configuration { message, .. } => FslError::Configuration {
                    script: self.source.script().map(PathBuf::from),
                    message,
                },
                other => other,
            })?;
            tracing::debug!(release = %found, "FSL release accepted");
        }

        Ok(self.env.get_or_init(|| env))
    }

    /// Locate `tool` with `which` and return the path it prints.
    pub fn check_install(&self, tool: &str) -> Result<String, FslError> {
        let invocation =
            ToolInvocation::new(LOOKUP_PROGRAM, [tool]).with_env(self.environment()?.clone());
        tracing::debug!(tool, "looking up tool");

        let result = self.launcher.launch(&invocation)?;
        let resolved = result.stdout.lines().next().unwrap_or("").trim();
        if !result.success() || resolved.is_empty() {
            tracing::warn!(tool, exit_code = result.exit_code, "tool not found");
            return Err(FslError::MissingTool {
                tool: tool.to_string(),
            });
        }

        Ok(resolved.to_string())
    }

    /// Run `tool args...` and fail when it exits non-zero.
    pub fn run<I, A>(&self, tool: &str, args: I) -> Result<ExecutionResult, FslError>
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        let invocation = ToolInvocation::new(tool, args).with_env(self.environment()?.clone());
        tracing::debug!(command = %invocation.command_line(), "running tool");

        let result = self.launcher.launch(&invocation)?;
        if !result.success() {
            tracing::warn!(
                tool,
                exit_code = result.exit_code,
                stderr = %result.stderr.trim(),
                "tool failed"
            );
            return Err(FslError::Execution {
                tool: tool.to_string(),
                exit_code: result.exit_code,
                stderr: result.stderr,
            });
        }

        Ok(result)
    }
}

impl Default for ToolInvoker {
    fn default() -> Self {
        Self::new(None, None)
    }
}
