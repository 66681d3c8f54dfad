pub mod args;
pub mod commands;

pub use args::{ApplyMaskArgs, CheckArgs, EnvArgs, GlobalArgs, Reorient2stdArgs, RunArgs};

use crate::core::{AppConfig, ConfigLoader, FslError};
use crate::logging;
use crate::tools::ToolInvoker;
use clap::{Parser, Subcommand};

const HELP_TEMPLATE: &str = "\
{name} {version}\n\
{about-with-newline}\n\
USAGE:\n    {usage}\n\
\nOPTIONS:\n{options}\n\
TOOL COMMANDS:\n{subcommands}\n\
{after-help}";

#[derive(Parser, Debug)]
#[command(name = "fslwrap")]
#[command(version = crate::VERSION)]
#[command(about = "Run FSL tools inside the environment defined by an FSL configuration script")]
#[command(help_template = HELP_TEMPLATE)]
#[command(after_long_help = long_help())]
pub struct Args {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(
        about = "Locate a tool in the FSL environment",
        after_help = "Example:\n    fslwrap check fslmaths"
    )]
    Check(CheckArgs),
    #[command(
        about = "Run any FSL tool with raw arguments",
        long_about = "Run locates the tool, executes it with the given arguments and prints its standard output. A non-zero exit is reported with the tool's stderr.",
        after_help = "Example:\n    fslwrap run fslstats -- brain.nii.gz -V"
    )]
    Run(RunArgs),
    #[command(
        name = "reorient2std",
        about = "Reorient an image to the standard template orientation",
        after_help = "Example:\n    fslwrap reorient2std t1.nii.gz t1_std.nii.gz"
    )]
    Reorient2std(Reorient2stdArgs),
    #[command(
        about = "Mask an image with fslmaths -mas",
        after_help = "Example:\n    fslwrap apply-mask t1.nii.gz brain_mask.nii.gz t1_brain.nii.gz"
    )]
    ApplyMask(ApplyMaskArgs),
    #[command(
        about = "Print the environment tools run under",
        after_help = "Example:\n    fslwrap env --json"
    )]
    Env(EnvArgs),
}

fn long_help() -> String {
    let mut help = format!(
        "The FSL configuration script is sourced once per command; tools are located with \
         `which` inside that environment before they run.\n\n\
         Written against FSL {}; set [fsl].release or --fsl-release to require a release.\n\n\
         ENVIRONMENT:\n",
        crate::FSL_RELEASE
    );
    for line in ConfigLoader::env_var_documentation() {
        help.push_str("    ");
        help.push_str(line);
        help.push('\n');
    }
    help
}

/// Fold command-line flags over the loaded configuration.
pub fn apply_overrides(config: &mut AppConfig, global: &GlobalArgs) {
    if let Some(fslconfig) = &global.fslconfig {
        config.fsl.fslconfig = fslconfig.clone();
    }
    if let Some(release) = &global.fsl_release {
        config.fsl.release = Some(release.clone());
    }
    if global.verify_output {
        config.fsl.verify_outputs = true;
    }
}

pub fn run(args: Args) -> crate::Result<()> {
    let mut config = ConfigLoader::load(args.global.config.as_deref())?;
    apply_overrides(&mut config, &args.global);

    let logging_guard = logging::init(&config.logging, args.global.verbose)?;
    tracing::debug!(
        console = %logging_guard.console_output(),
        log_file = ?logging_guard.log_file_path(),
        "logging initialized"
    );
    tracing::debug!(
        fslconfig = %config.fsl.fslconfig.display(),
        shell = %config.fsl.shell,
        "configuration loaded"
    );

    let invoker = ToolInvoker::from_settings(&config.fsl);
    let outcome = match args.command {
        Command::Check(check_args) => commands::check(&invoker, check_args),
        Command::Run(run_args) => commands::run(&invoker, run_args),
        Command::Reorient2std(reorient_args) => commands::reorient2std(&invoker, reorient_args),
        Command::ApplyMask(mask_args) => commands::apply_mask_command(&invoker, mask_args),
        Command::Env(env_args) => commands::env(&invoker, env_args),
    };

    if let Err(err) = &outcome {
        if let Some(fsl_err) = err.downcast_ref::<FslError>() {
            tracing::debug!(code = fsl_err.code(), category = %fsl_err.category(), "{}", fsl_err);
        }
    }
    outcome
}

/// Exit status for a failed command.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<FslError>()
        .map(FslError::exit_code)
        .unwrap_or(1)
}
