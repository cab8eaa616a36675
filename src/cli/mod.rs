//! CLI layer - user-facing command-line interface.
//!
//! ## Module Structure
//!
//! - `args`: CLI argument definitions using clap
//! - `exit_status`: exit status codes
//! - `report`: output rendering (serialised docs, JSON, projections)
//! - `run`: command dispatcher

use std::process::ExitCode;

use anyhow::Result;

pub use args::{Arguments, Command};
pub use exit_status::ExitStatus;

pub mod args;
mod exit_status;
mod report;
mod run;

pub fn run_cli(args: Arguments) -> Result<ExitCode> {
    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitCode::from(0));
    };
    let Some(command) = args.command else {
        return Ok(ExitCode::from(0));
    };

    let status = run::run(command)?;
    Ok(status.into())
}
