//! md-merge: concatenates the markdown files of a directory.
//!
//! Exit codes:
//! - 0: success
//! - 1: I/O failure
//! - 2: usage error
//! - 3: input directory missing or not a directory
//! - 4: output from a previous run found inside the input directory
//! - 130: interrupted

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod cli;

use cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match md_merge::run(cli.into_config()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("erro: {:#}", err);
            ExitCode::from(md_merge::error::exit_code_for(&err))
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "md_merge=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Ignored if a subscriber is already installed.
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}
