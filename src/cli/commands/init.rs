use std::{fs, path::Path};

use anyhow::{Context, Result};
use colored::Colorize;

use super::super::exit_status::ExitStatus;
use super::super::report::SUCCESS_MARK;
use crate::config::{CONFIG_FILE_NAME, Config, default_config_json};

/// Writes the default `.assetlocrc.json` into the working directory.
///
/// An existing file is left untouched and the command fails.
pub fn init() -> Result<ExitStatus> {
    let config_path = Path::new(CONFIG_FILE_NAME);

    if config_path.exists() {
        eprintln!(
            "Error: {} already exists, edit it instead of re-initializing",
            CONFIG_FILE_NAME
        );
        return Ok(ExitStatus::Failure);
    }

    fs::write(config_path, default_config_json()?)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    let defaults = Config::default();
    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Wrote default config to {}", CONFIG_FILE_NAME).green()
    );
    println!(
        "  - extract writes {} and shortens paths below {}/ or {}/",
        defaults.output, defaults.project_marker, defaults.content_marker
    );

    Ok(ExitStatus::Success)
}
