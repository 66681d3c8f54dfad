pub mod environment;
pub mod execution;
pub mod filetools;
pub mod launcher;

pub use environment::{EnvironmentSource, ShellScriptEnvironment, StaticEnvironment};
pub use execution::ToolInvoker;
pub use filetools::{apply_mask, fslreorient2std};
pub use launcher::{ProcessLauncher, SystemLauncher};
