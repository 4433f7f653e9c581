use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::{PathMarkers, ScanOptions};

pub const CONFIG_FILE_NAME: &str = ".assetlocrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory name that marks the project root in object paths.
    #[serde(default = "default_project_marker")]
    pub project_marker: String,
    /// Directory name tried after the project marker for document paths.
    #[serde(default = "default_content_marker")]
    pub content_marker: String,
    /// Extension of exported documents, without the dot.
    #[serde(default = "default_extension")]
    pub extension: String,
    /// CSV file written by `extract`.
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default)]
    pub ignores: Vec<String>,
}

fn default_project_marker() -> String {
    PathMarkers::default().project
}

fn default_content_marker() -> String {
    PathMarkers::default().content
}

fn default_extension() -> String {
    "json".to_string()
}

fn default_output() -> String {
    "parsed.csv".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_marker: default_project_marker(),
            content_marker: default_content_marker(),
            extension: default_extension(),
            output: default_output(),
            ignores: Vec::new(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if a marker or the extension is empty, or if any glob
    /// pattern in `ignores` is invalid.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("projectMarker", &self.project_marker),
            ("contentMarker", &self.content_marker),
            ("extension", &self.extension),
        ] {
            if value.trim().is_empty() {
                anyhow::bail!("'{}' must not be empty", field);
            }
        }

        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        Ok(())
    }

    pub fn markers(&self) -> PathMarkers {
        PathMarkers {
            project: self.project_marker.clone(),
            content: self.content_marker.clone(),
        }
    }

    pub fn scan_options(&self, verbose: bool) -> ScanOptions {
        ScanOptions {
            extension: self.extension.trim_start_matches('.').to_string(),
            ignores: self.ignores.clone(),
            verbose,
        }
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
