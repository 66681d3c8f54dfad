use clap::Parser;
use fslwrap::cli::{self, Args};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();
    match cli::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<fslwrap::FslError>() {
                Some(fsl_err) => eprintln!("error[{}]: {:#}", fsl_err.code(), err),
                None => eprintln!("error: {:#}", err),
            }
            ExitCode::from(cli::exit_code(&err))
        }
    }
}
