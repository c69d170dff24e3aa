//! corpus-stats - line and byte counts for corpus files
//!
//! corpus-stats provides:
//! - Line counting with a bounded preview for a file or standard input
//! - Flat or recursive directory walks with an extension allowlist
//! - A continue-on-error policy that records per-file failures
//! - Text or JSON reports and distinct exit codes per failure kind

use clap::Parser;
use std::process::ExitCode;

mod cli;
mod core;
mod logging;
mod scan;

fn main() -> ExitCode {
    let cli = match cli::Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = cli::usage_exit_code(&err);
            let _ = err.print();
            return ExitCode::from(code);
        }
    };

    logging::setup_logging(logging::Verbosity::from_flags(cli.verbose, cli.quiet));

    match cli::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(cli::failure_exit_code(&err))
        }
    }
}
