//! Report formatting and printing utilities.
//!
//! Kept apart from the extraction engine so assetloc can be used as a library.

use std::{
    io::{self, Write},
    path::Path,
};

use colored::Colorize;

use crate::compare::{ComparePaths, Comparison, KeyedCsv};
use crate::core::ExtractSummary;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

fn plural(count: usize, one: &str, many: &str) -> String {
    format!("{} {}", count, if count == 1 { one } else { many })
}

/// Print the outcome of an extraction run.
pub fn print_extract(summary: &ExtractSummary, output: &Path) {
    print_extract_to(summary, output, &mut io::stdout().lock());
}

pub fn print_extract_to<W: Write>(summary: &ExtractSummary, output: &Path, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Extracted {} from {} to {}",
            plural(summary.total_rows(), "row", "rows"),
            plural(summary.documents, "document", "documents"),
            output.display()
        )
        .green()
    );
    if summary.table_rows > 0 {
        let _ = writeln!(
            writer,
            "  - string tables: {}",
            plural(summary.table_rows, "row", "rows")
        );
    }
}

/// Print a warning about documents the string-table pass had to skip.
pub fn print_prescan_warning(count: usize, verbose: bool) {
    print_prescan_warning_to(count, verbose, &mut io::stderr().lock());
}

pub fn print_prescan_warning_to<W: Write>(count: usize, verbose: bool, writer: &mut W) {
    if count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} could not be read while collecting string tables. Use {} to see details.",
            "warning:".bold().yellow(),
            plural(count, "document", "documents"),
            "-v".cyan()
        );
    }
}

/// Print a warning about paths the document scan could not access.
pub fn print_scan_warning(count: usize, verbose: bool) {
    print_scan_warning_to(count, verbose, &mut io::stderr().lock());
}

pub fn print_scan_warning_to<W: Write>(count: usize, verbose: bool, writer: &mut W) {
    if count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} could not be accessed; documents below them are missing from the output. Use {} to see details.",
            "warning:".bold().yellow(),
            plural(count, "path", "paths"),
            "-v".cyan()
        );
    }
}

/// Print the comparison summary.
pub fn print_compare(
    a: (&Path, &KeyedCsv),
    b: (&Path, &KeyedCsv),
    comparison: &Comparison<'_>,
    paths: &ComparePaths,
) {
    print_compare_to(a, b, comparison, paths, &mut io::stdout().lock());
}

pub fn print_compare_to<W: Write>(
    (a_path, a): (&Path, &KeyedCsv),
    (b_path, b): (&Path, &KeyedCsv),
    comparison: &Comparison<'_>,
    paths: &ComparePaths,
    writer: &mut W,
) {
    let _ = writeln!(writer, "{} {}", "A:".bold(), a_path.display());
    let _ = writeln!(writer, "{} {}", "B:".bold(), b_path.display());
    for (label, csv) in [("A", a), ("B", b)] {
        let _ = writeln!(
            writer,
            "Rows ({}): {}, unique keys ({}): {}",
            label,
            csv.row_count(),
            label,
            csv.unique_key_count()
        );
    }

    let only_a = comparison.only_in_a();
    let _ = writeln!(writer);
    let _ = writeln!(writer, "{} ({}):", "Keys only in A".yellow().bold(), only_a.len());
    for suffix in only_a {
        let _ = writeln!(writer, "{}", comparison.a_key(suffix).unwrap_or(suffix));
    }

    let only_b = comparison.only_in_b();
    let _ = writeln!(writer);
    let _ = writeln!(writer, "{} ({}):", "Keys only in B".yellow().bold(), only_b.len());
    for suffix in only_b {
        let _ = writeln!(writer, "{}", comparison.b_key(suffix).unwrap_or(suffix));
    }

    let _ = writeln!(writer);
    let _ = writeln!(writer, "Common keys: {}", comparison.common_count());
    let _ = writeln!(writer);
    let _ = writeln!(writer, "{} Created files:", SUCCESS_MARK.green());
    for path in [&paths.common, &paths.only_a, &paths.only_b] {
        let _ = writeln!(writer, "  {}", path.display());
    }
}
