//! Resolution of the environment mapping tools run under.

use crate::core::error::FslError;
use crate::core::types::{EnvMap, ToolInvocation};
use crate::tools::launcher::ProcessLauncher;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Shell script shipped by the Debian/NeuroDebian FSL packages.
pub const DEFAULT_FSL_CONFIG: &str = "/etc/fsl/5.0/fsl.sh";

/// Shell used to source the configuration script.
pub const DEFAULT_SHELL: &str = "bash";

/// Sources `$0` quietly, then dumps the resulting environment as
/// NUL-terminated records.
const SOURCE_AND_DUMP: &str = ". \"$0\" >/dev/null && env -0";

/// Produces the environment mapping for an invoker.
pub trait EnvironmentSource: Send + Sync {
    fn load(&self, launcher: &dyn ProcessLauncher) -> Result<EnvMap, FslError>;

    /// Script the mapping comes from, when there is one.
    fn script(&self) -> Option<&Path> {
        None
    }
}

/// A mapping supplied by the caller, used as-is.
#[derive(Debug, Clone, Default)]
pub struct StaticEnvironment(pub EnvMap);

impl EnvironmentSource for StaticEnvironment {
    fn load(&self, _launcher: &dyn ProcessLauncher) -> Result<EnvMap, FslError> {
        Ok(self.0.clone())
    }
}

/// Environment obtained by sourcing a shell script and running `env`.
#[derive(Debug, Clone)]
pub struct ShellScriptEnvironment {
    script: PathBuf,
    shell: String,
}

impl ShellScriptEnvironment {
    pub fn new<P: Into<PathBuf>>(script: P) -> Self {
        Self {
            script: script.into(),
            shell: DEFAULT_SHELL.to_string(),
        }
    }

    pub fn with_shell<S: Into<String>>(mut self, shell: S) -> Self {
        self.shell = shell.into();
        self
    }

    fn readable_script(&self) -> Result<PathBuf, FslError> {
        let unreadable = |err: std::io::Error| {
            FslError::configuration(
                Some(self.script.clone()),
                format!("cannot read configuration script: {}", err),
            )
        };
        let script = fs::canonicalize(&self.script).map_err(unreadable)?;
        fs::File::open(&script).map_err(unreadable)?;
        Ok(script)
    }
}

impl EnvironmentSource for ShellScriptEnvironment {
    fn load(&self, launcher: &dyn ProcessLauncher) -> Result<EnvMap, FslError> {
        let script = self.readable_script()?;
        let invocation = ToolInvocation::new(
            self.shell.clone(),
            [
                "-c".to_string(),
                SOURCE_AND_DUMP.to_string(),
                script.display().to_string(),
            ],
        );

        tracing::debug!(script = %script.display(), shell = %self.shell, "sourcing FSL configuration");

        let result = launcher.launch(&invocation).map_err(|err| match err {
            FslError::Launch { program, source } => FslError::configuration(
                Some(self.script.clone()),
                format!("failed to start shell '{}': {}", program, source),
            ),
            other => other,
        })?;

        if !result.success() {
            return Err(FslError::configuration(
                Some(self.script.clone()),
                format!(
                    "shell exited with code {}: {}",
                    result.exit_code,
                    result.stderr.trim()
                ),
            ));
        }

        let env = parse_env_output(&result.stdout);
        tracing::debug!(variables = env.len(), "resolved tool environment");
        Ok(env)
    }

    fn script(&self) -> Option<&Path> {
        Some(&self.script)
    }
}

fn variable_name() -> &'static Regex {
    static NAME: OnceLock<Regex> = OnceLock::new();
    NAME.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("static regex"))
}

/// Parse the output of `env -0` into a mapping.
///
/// Records are split on NUL, so values may contain newlines and `=`.
/// Records whose name is not a valid variable name (exported bash functions
/// such as `BASH_FUNC_x%%`) are skipped.
pub fn parse_env_output(output: &str) -> EnvMap {
    output
        .split('\0')
        .filter_map(|record| record.split_once('='))
        .filter(|(key, _)| variable_name().is_match(key))
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

/// Check `$FSLDIR/etc/fslversion` against the expected release prefix.
pub fn check_release(env: &EnvMap, expected: &str) -> Result<String, FslError> {
    let fsldir = env
        .get("FSLDIR")
        .filter(|dir| !dir.trim().is_empty())
        .ok_or_else(|| FslError::configuration(None, "FSLDIR is not set by the configuration"))?;

    let version_file = Path::new(fsldir).join("etc").join("fslversion");
    let content = fs::read_to_string(&version_file).map_err(|err| {
        FslError::configuration(
            None,
            format!("cannot read {}: {}", version_file.display(), err),
        )
    })?;

    let found = content.trim().to_string();
    if !found.starts_with(expected) {
        return Err(FslError::configuration(
            None,
            format!("FSL release {} found, {} expected", found, expected),
        ));
    }
    Ok(found)
}
