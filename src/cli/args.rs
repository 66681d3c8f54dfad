use clap::Args;
use std::path::PathBuf;

/// Options accepted by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// FSL shell configuration script to source (default: /etc/fsl/5.0/fsl.sh)
    #[arg(long, global = true, value_name = "FILE", help_heading = "Configuration")]
    pub fslconfig: Option<PathBuf>,

    /// Path to fslwrap.toml (default: $FSLWRAP_CONFIG, then the user config dir)
    #[arg(long, global = true, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<PathBuf>,

    /// Require this FSL release prefix in $FSLDIR/etc/fslversion
    #[arg(long, global = true, value_name = "VERSION", help_heading = "Configuration")]
    pub fsl_release: Option<String>,

    /// Fail when a helper's output file is missing after the tool succeeded
    #[arg(long, global = true, help_heading = "Output Options")]
    pub verify_output: bool,

    /// Log every lookup and invocation (debug level)
    #[arg(short, long, global = true, help_heading = "Output Options")]
    pub verbose: bool,
}

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Tool to locate, e.g. fslmaths
    #[arg(value_name = "TOOL")]
    pub tool: String,
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Tool to run
    #[arg(value_name = "TOOL")]
    pub tool: String,

    /// Arguments passed to the tool verbatim
    #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct Reorient2stdArgs {
    /// Image to reorient
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Where the reoriented image is written
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct ApplyMaskArgs {
    /// Image to mask
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Binary mask image
    #[arg(value_name = "MASK")]
    pub mask: PathBuf,

    /// Where the masked image is written
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct EnvArgs {
    /// Emit a JSON object instead of KEY=VALUE lines
    #[arg(long)]
    pub json: bool,
}
