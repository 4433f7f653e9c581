use std::fs;

use anyhow::{Context, Result};

use super::super::{args::CompareCommand, exit_status::ExitStatus, report};
use crate::compare::{ComparePaths, Comparison, KeyedCsv, write_outputs};

pub fn compare(cmd: CompareCommand) -> Result<ExitStatus> {
    for path in [&cmd.a, &cmd.b] {
        if !path.is_file() {
            anyhow::bail!("File not found: {}", path.display());
        }
    }

    let a = KeyedCsv::read(&cmd.a)?;
    let b = KeyedCsv::read(&cmd.b)?;
    if cmd.common.verbose {
        eprintln!(
            "read {} rows from {}, {} rows from {}",
            a.row_count(),
            cmd.a.display(),
            b.row_count(),
            cmd.b.display()
        );
    }

    fs::create_dir_all(&cmd.out_dir)
        .with_context(|| format!("Failed to create {}", cmd.out_dir.display()))?;
    let paths = ComparePaths::new(&cmd.a, &cmd.b, &cmd.out_dir);
    write_outputs(&a, &b, &paths)?;

    let comparison = Comparison::new(&a, &b);
    report::print_compare(
        (cmd.a.as_path(), &a),
        (cmd.b.as_path(), &b),
        &comparison,
        &paths,
    );

    Ok(ExitStatus::Success)
}
