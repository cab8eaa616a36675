//! stackforge CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use stackforge::cli::{self, Arguments};

fn main() -> ExitCode {
    let args = Arguments::parse();

    match cli::run_cli(args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(1)
        }
    }
}
