use crate::cli::args::{ApplyMaskArgs, CheckArgs, EnvArgs, Reorient2stdArgs, RunArgs};
use crate::tools::{apply_mask, fslreorient2std, ToolInvoker};
use crate::Result;
use anyhow::Context;
use std::collections::BTreeMap;
use std::io::Write;

pub fn check(invoker: &ToolInvoker, args: CheckArgs) -> Result<()> {
    let resolved = invoker.check_install(&args.tool)?;
    println!("{}", resolved);
    Ok(())
}

pub fn run(invoker: &ToolInvoker, args: RunArgs) -> Result<()> {
    invoker.check_install(&args.tool)?;
    let result = invoker.run(&args.tool, args.args)?;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(result.stdout.as_bytes())
        .context("failed to write tool output")?;
    if !result.stderr.is_empty() {
        tracing::info!(tool = %args.tool, stderr = %result.stderr.trim(), "tool wrote to stderr");
    }
    Ok(())
}

pub fn reorient2std(invoker: &ToolInvoker, args: Reorient2stdArgs) -> Result<()> {
    let output = fslreorient2std(invoker, &args.input, &args.output)?;
    println!("{}", output.display());
    Ok(())
}

pub fn apply_mask_command(invoker: &ToolInvoker, args: ApplyMaskArgs) -> Result<()> {
    let output = apply_mask(invoker, &args.input, &args.mask, &args.output)?;
    println!("{}", output.display());
    Ok(())
}

pub fn env(invoker: &ToolInvoker, args: EnvArgs) -> Result<()> {
    let sorted: BTreeMap<_, _> = invoker.environment()?.iter().collect();

    if args.json {
        let rendered =
            serde_json::to_string_pretty(&sorted).context("failed to serialize environment")?;
        println!("{}", rendered);
    } else {
        for (key, value) in sorted {
            println!("{}={}", key, value);
        }
    }
    Ok(())
}
