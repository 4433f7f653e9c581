use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{compare::compare, extract::extract, init::init},
    exit_status::ExitStatus,
};

/// Dispatches to the command handler for the parsed arguments.
pub fn run(Arguments { command }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::Extract(cmd)) => extract(cmd),
        Some(Command::Compare(cmd)) => compare(cmd),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
