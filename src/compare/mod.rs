//! Reconciliation of two extracted CSV files.
//!
//! Keys are matched by their suffix, the part after the first `::`, so the
//! same string found under different namespaces in two builds still pairs up.
//! Within each file the first row for a suffix represents it.

use std::{
    collections::{BTreeSet, HashMap, HashSet},
    fs::File,
    io::{Read, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::core::NAMESPACE_SEPARATOR;

/// Part of `key` after the first `::`, or the whole key.
pub fn key_suffix(key: &str) -> &str {
    key.split_once(NAMESPACE_SEPARATOR)
        .map(|(_, suffix)| suffix)
        .unwrap_or(key)
}

/// One CSV row and its trimmed key cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub row: Vec<String>,
}

/// A CSV file whose first column holds keys.
#[derive(Debug, Default)]
pub struct KeyedCsv {
    /// First row, when its first cell reads `key`.
    pub header: Option<Vec<String>>,
    /// Rows with a non-empty key, in file order.
    pub entries: Vec<Entry>,
}

impl KeyedCsv {
    pub fn read(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        Self::from_reader(file).with_context(|| format!("Failed to read CSV {}", path.display()))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut csv = KeyedCsv::default();
        let mut first = true;
        for record in reader.records() {
            let record = record?;
            if record.is_empty() {
                continue;
            }
            let row: Vec<String> = record.iter().map(str::to_string).collect();
            let key = row[0].trim().to_string();
            if first {
                first = false;
                if key.to_lowercase() == "key" {
                    csv.header = Some(row);
                    continue;
                }
            }
            if !key.is_empty() {
                csv.entries.push(Entry { key, row });
            }
        }
        Ok(csv)
    }

    pub fn row_count(&self) -> usize {
        self.entries.len()
    }

    pub fn unique_key_count(&self) -> usize {
        self.entries
            .iter()
            .map(|e| e.key.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    /// First entry for every key suffix.
    fn first_by_suffix(&self) -> HashMap<&str, &Entry> {
        let mut by_suffix = HashMap::new();
        for entry in &self.entries {
            by_suffix.entry(key_suffix(&entry.key)).or_insert(entry);
        }
        by_suffix
    }
}

/// Suffix-level comparison of two keyed CSV files.
pub struct Comparison<'c> {
    a: &'c KeyedCsv,
    b: &'c KeyedCsv,
    a_by_suffix: HashMap<&'c str, &'c Entry>,
    b_by_suffix: HashMap<&'c str, &'c Entry>,
}

impl<'c> Comparison<'c> {
    pub fn new(a: &'c KeyedCsv, b: &'c KeyedCsv) -> Self {
        Self {
            a,
            b,
            a_by_suffix: a.first_by_suffix(),
            b_by_suffix: b.first_by_suffix(),
        }
    }

    fn missing_from(
        from: &HashMap<&'c str, &'c Entry>,
        other: &HashMap<&'c str, &'c Entry>,
    ) -> BTreeSet<&'c str> {
        from.keys()
            .filter(|suffix| !other.contains_key(*suffix))
            .copied()
            .collect()
    }

    /// Suffixes present only in A, sorted.
    pub fn only_in_a(&self) -> BTreeSet<&'c str> {
        Self::missing_from(&self.a_by_suffix, &self.b_by_suffix)
    }

    /// Suffixes present only in B, sorted.
    pub fn only_in_b(&self) -> BTreeSet<&'c str> {
        Self::missing_from(&self.b_by_suffix, &self.a_by_suffix)
    }

    pub fn common_count(&self) -> usize {
        self.a_by_suffix
            .keys()
            .filter(|suffix| self.b_by_suffix.contains_key(*suffix))
            .count()
    }

    /// Full key representing `suffix` in A.
    pub fn a_key(&self, suffix: &str) -> Option<&'c str> {
        self.a_by_suffix.get(suffix).map(|e| e.key.as_str())
    }

    /// Full key representing `suffix` in B.
    pub fn b_key(&self, suffix: &str) -> Option<&'c str> {
        self.b_by_suffix.get(suffix).map(|e| e.key.as_str())
    }

    /// A's rows whose suffix also exists in B, keyed with B's full key.
    pub fn common_rows(&self) -> Vec<Vec<String>> {
        self.a
            .entries
            .iter()
            .filter_map(|entry| {
                let b_entry = self.b_by_suffix.get(key_suffix(&entry.key))?;
                let mut row = entry.row.clone();
                row[0] = b_entry.key.clone();
                Some(row)
            })
            .collect()
    }

    /// A's rows whose suffix is absent from B.
    pub fn only_a_rows(&self) -> Vec<Vec<String>> {
        Self::rows_without(self.a, &self.b_by_suffix)
    }

    /// B's rows whose suffix is absent from A.
    pub fn only_b_rows(&self) -> Vec<Vec<String>> {
        Self::rows_without(self.b, &self.a_by_suffix)
    }

    fn rows_without(csv: &KeyedCsv, other: &HashMap<&str, &Entry>) -> Vec<Vec<String>> {
        csv.entries
            .iter()
            .filter(|entry| !other.contains_key(key_suffix(&entry.key)))
            .map(|entry| entry.row.clone())
            .collect()
    }
}

/// Files written by a comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparePaths {
    pub common: PathBuf,
    pub only_a: PathBuf,
    pub only_b: PathBuf,
}

impl ComparePaths {
    /// `Common <A> <B>.csv`, `Only <A>.csv` and `Only <B>.csv` inside `out_dir`.
    pub fn new(a: &Path, b: &Path, out_dir: &Path) -> Self {
        let stem = |p: &Path| {
            p.file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default()
        };
        let (a_stem, b_stem) = (stem(a), stem(b));
        Self {
            common: out_dir.join(format!("Common {} {}.csv", a_stem, b_stem)),
            only_a: out_dir.join(format!("Only {}.csv", a_stem)),
            only_b: out_dir.join(format!("Only {}.csv", b_stem)),
        }
    }
}

pub fn write_rows<W: Write>(
    writer: W,
    header: Option<&[String]>,
    rows: &[Vec<String>],
) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(writer);
    if let Some(header) = header {
        writer.write_record(header)?;
    }
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_file(path: &Path, header: Option<&[String]>, rows: &[Vec<String>]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    write_rows(file, header, rows).with_context(|| format!("Failed to write {}", path.display()))
}

/// Writes the three comparison files.
pub fn write_outputs(a: &KeyedCsv, b: &KeyedCsv, paths: &ComparePaths) -> Result<()> {
    let comparison = Comparison::new(a, b);
    write_file(&paths.common, a.header.as_deref(), &comparison.common_rows())?;
    write_file(&paths.only_a, a.header.as_deref(), &comparison.only_a_rows())?;
    write_file(&paths.only_b, b.header.as_deref(), &comparison.only_b_rows())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn parse(text: &str) -> KeyedCsv {
        KeyedCsv::from_reader(text.as_bytes()).unwrap()
    }

    #[test]
    fn test_key_suffix() {
        assert_eq!(key_suffix("NS::K"), "K");
        assert_eq!(key_suffix("A::B::C"), "B::C");
        assert_eq!(key_suffix("Plain"), "Plain");
    }

    #[test]
    fn test_read_header_blank_and_keyless_rows() {
        let csv = parse(" Key ,source\n\nNS::A,a\n,orphan\nB,b,extra\n");
        assert_eq!(csv.header, Some(vec![" Key ".to_string(), "source".to_string()]));
        assert_eq!(
            csv.entries,
            vec![
                Entry {
                    key: "NS::A".to_string(),
                    row: vec!["NS::A".to_string(), "a".to_string()]
                },
                Entry {
                    key: "B".to_string(),
                    row: vec!["B".to_string(), "b".to_string(), "extra".to_string()]
                },
            ]
        );
    }

    #[test]
    fn test_read_without_header() {
        let csv = parse("X,1\nY,2\n");
        assert_eq!(csv.header, None);
        assert_eq!(csv.row_count(), 2);
    }

    #[test]
    fn test_compare_by_suffix() {
        let a = parse("key,source\nOld::A,a1\nB,b\nOld::A,a2\nOnlyA,x\n");
        let b = parse("key,source,Translation\nNew::A,a,ta\nNew::B,b,tb\nOnlyB,y,ty\n");
        let cmp = Comparison::new(&a, &b);

        assert_eq!(cmp.only_in_a().into_iter().collect::<Vec<_>>(), vec!["OnlyA"]);
        assert_eq!(cmp.only_in_b().into_iter().collect::<Vec<_>>(), vec!["OnlyB"]);
        assert_eq!(cmp.common_count(), 2);
        assert_eq!(a.unique_key_count(), 3);
        assert_eq!(cmp.a_key("A"), Some("Old::A"));
        assert_eq!(cmp.b_key("A"), Some("New::A"));

        assert_eq!(
            cmp.common_rows(),
            vec![
                vec!["New::A".to_string(), "a1".to_string()],
                vec!["New::B".to_string(), "b".to_string()],
                vec!["New::A".to_string(), "a2".to_string()],
            ]
        );
        assert_eq!(
            cmp.only_b_rows(),
            vec![vec!["OnlyB".to_string(), "y".to_string(), "ty".to_string()]]
        );
    }

    #[test]
    fn test_output_paths() {
        let paths = ComparePaths::new(Path::new("in/old.csv"), Path::new("new.csv"), Path::new("out"));
        assert_eq!(paths.common, Path::new("out").join("Common old new.csv"));
        assert_eq!(paths.only_a, Path::new("out").join("Only old.csv"));
        assert_eq!(paths.only_b, Path::new("out").join("Only new.csv"));
    }

    #[test]
    fn test_write_rows_with_header() {
        let mut out = Vec::new();
        let header = vec!["key".to_string(), "source".to_string()];
        write_rows(
            &mut out,
            Some(header.as_slice()),
            &[vec!["K".to_string(), "multi\nline".to_string()]],
        )
        .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "key,source\nK,\"multi\nline\"\n");
    }
}
