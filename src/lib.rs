//! Call-and-check wrappers around the FSL neuroimaging toolkit.
//!
//! A [`tools::ToolInvoker`] sources an FSL configuration script once, locates
//! tools with `which` and runs them as blocking subprocesses. The helpers in
//! [`tools::filetools`] are thin callers of the invoker.

pub mod cli;
pub mod core;
pub mod logging;
pub mod tools;

pub use crate::core::{EnvMap, ExecutionResult, FslError, OutputPolicy, ToolInvocation};
pub use crate::tools::{apply_mask, fslreorient2std, ToolInvoker};

/// Current crate version string exposed for CLI and tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// FSL release the wrappers were written against.
pub const FSL_RELEASE: &str = "5.0.9";

pub type Result<T> = std::result::Result<T, anyhow::Error>;
