use std::{
    env,
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use colored::Colorize;

use super::super::{args::ExtractCommand, exit_status::ExitStatus, report};
use crate::config::{ConfigLoadResult, load_config};
use crate::core::{CsvSink, DocumentSource, extract_all};

/// A root naming a document stands for the directory holding it.
fn resolve_root(root: &Path, extension: &str) -> PathBuf {
    let is_document = root.is_file()
        && root
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(extension));
    if !is_document {
        return root.to_path_buf();
    }
    match root.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

pub fn extract(cmd: ExtractCommand) -> Result<ExitStatus> {
    let verbose = cmd.common.verbose;
    let cwd = env::current_dir().context("Failed to get current directory")?;
    let ConfigLoadResult {
        mut config,
        from_file,
    } = load_config(&cwd)?;
    if let Some(marker) = cmd.project_marker {
        config.project_marker = marker;
        config.validate()?;
    }
    if verbose && from_file {
        eprintln!("using config from {}", cwd.display());
    }

    let options = config.scan_options(verbose);
    let roots: Vec<PathBuf> = cmd
        .roots
        .iter()
        .map(|root| resolve_root(root, &options.extension))
        .collect();
    let source = DocumentSource::scan(&roots, &options);
    if source.is_empty() {
        eprintln!(
            "{} no .{} documents found",
            "warning:".bold().yellow(),
            options.extension
        );
    }

    let output = cmd.out.unwrap_or_else(|| PathBuf::from(&config.output));
    let file =
        File::create(&output).with_context(|| format!("Failed to create {}", output.display()))?;
    let mut sink = CsvSink::new(BufWriter::new(file))
        .with_context(|| format!("Failed to write {}", output.display()))?;

    let summary = extract_all(&source, &config.markers(), &mut sink, verbose)?;
    sink.flush()
        .with_context(|| format!("Failed to write {}", output.display()))?;

    report::print_scan_warning(summary.scan_skipped, verbose);
    report::print_prescan_warning(summary.prescan_skipped, verbose);
    report::print_extract(&summary, &output);

    Ok(ExitStatus::Success)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_resolve_root() {
        let dir = tempdir().unwrap();
        let doc = dir.path().join("Intro.JSON");
        fs::write(&doc, "{}").unwrap();
        let notes = dir.path().join("notes.txt");
        fs::write(&notes, "").unwrap();

        assert_eq!(resolve_root(&doc, "json"), dir.path());
        assert_eq!(resolve_root(&notes, "json"), notes);
        assert_eq!(resolve_root(dir.path(), "json"), dir.path());
    }
}
