//! One-call wrappers around individual FSL image tools.
//!
//! Every helper follows the same sequence: validate inputs, locate the tool,
//! run it, hand back the requested output path.

use crate::core::error::FslError;
use crate::core::types::OutputPolicy;
use crate::tools::execution::ToolInvoker;
use std::path::{Path, PathBuf};

pub const FSLREORIENT2STD: &str = "fslreorient2std";
pub const FSLMATHS: &str = "fslmaths";

/// Reorient an image to match the orientation of the standard template.
pub fn fslreorient2std<P, Q>(invoker: &ToolInvoker, input: P, output: Q) -> Result<PathBuf, FslError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let (input, output) = (input.as_ref(), output.as_ref());
    require_inputs(&[input])?;

    invoker.check_install(FSLREORIENT2STD)?;
    invoker.run(FSLREORIENT2STD, [path_arg(input), path_arg(output)])?;

    produced(invoker, FSLREORIENT2STD, output)
}

/// Zero every voxel of `input` outside `mask` (`fslmaths in -mas mask out`).
pub fn apply_mask<P, M, Q>(
    invoker: &ToolInvoker,
    input: P,
    mask: M,
    output: Q,
) -> Result<PathBuf, FslError>
where
    P: AsRef<Path>,
    M: AsRef<Path>,
    Q: AsRef<Path>,
{
    let (input, mask, output) = (input.as_ref(), mask.as_ref(), output.as_ref());
    require_inputs(&[input, mask])?;

    invoker.check_install(FSLMATHS)?;
    invoker.run(
        FSLMATHS,
        [
            path_arg(input),
            "-mas".to_string(),
            path_arg(mask),
            path_arg(output),
        ],
    )?;

    produced(invoker, FSLMATHS, output)
}

fn require_inputs(paths: &[&Path]) -> Result<(), FslError> {
    match paths.iter().find(|path| !path.is_file()) {
        Some(missing) => {
            tracing::warn!(path = %missing.display(), "missing input file");
            Err(FslError::InvalidInput {
                path: missing.to_path_buf(),
            })
        }
        None => Ok(()),
    }
}

fn produced(invoker: &ToolInvoker, tool: &str, output: &Path) -> Result<PathBuf, FslError> {
    if invoker.output_policy() == OutputPolicy::Verify && !output.exists() {
        return Err(FslError::MissingOutput {
            tool: tool.to_string(),
            path: output.to_path_buf(),
        });
    }
    Ok(output.to_path_buf())
}

fn path_arg(path: &Path) -> String {
    path.display().to_string()
}
