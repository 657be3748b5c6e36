//! Command-line interface layer.

use anyhow::Result;

pub mod args;
pub mod commands;
pub mod report;
mod run;

pub use crate::core::ExitStatus;
pub use args::{Arguments, Command};

/// Run the parsed command and return its exit status.
///
/// Without a subcommand the help text is printed and the run succeeds.
pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    run::run(args)
}
