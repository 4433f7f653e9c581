//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: Extract localizable strings from exported asset JSON into a CSV
//! - `compare`: Compare the keys of two extracted CSV files
//! - `init`: Initialize assetloc configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Extract(cmd)) => cmd.common.verbose,
            Some(Command::Compare(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    /// Directories to scan (a .json file stands for its directory)
    #[arg(default_value = ".")]
    pub roots: Vec<PathBuf>,

    /// Output CSV file (overrides config file)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Project directory name used to shorten paths (overrides config file)
    #[arg(long, env = "ASSETLOC_PROJECT_MARKER")]
    pub project_marker: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct CompareCommand {
    /// First CSV file
    pub a: PathBuf,

    /// Second CSV file
    pub b: PathBuf,

    /// Directory for the generated files
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract localizable strings from exported asset JSON into a CSV file
    Extract(ExtractCommand),
    /// Compare the keys of two extracted CSV files by namespace-less suffix
    Compare(CompareCommand),
    /// Initialize a new .assetlocrc.json configuration file
    Init,
}
