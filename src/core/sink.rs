use std::io::{self, Write};

/// Header written before the first row.
pub const HEADER: [&str; 4] = ["key", "source", "Translation", "context"];

/// One extracted string. `translation` is always empty at extraction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub key: String,
    pub source: String,
    pub translation: String,
    /// Provenance lines joined with `\n`, address first.
    pub context: String,
}

impl Row {
    pub fn new(key: String, source: String, context: String) -> Self {
        Self {
            key,
            source,
            translation: String::new(),
            context,
        }
    }
}

/// Destination for extracted rows.
pub trait RowSink {
    fn write_row(&mut self, row: &Row) -> io::Result<()>;
}

impl RowSink for Vec<Row> {
    fn write_row(&mut self, row: &Row) -> io::Result<()> {
        self.push(row.clone());
        Ok(())
    }
}

/// Writes rows as CSV, header first.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvSink<W> {
    pub fn new(writer: W) -> io::Result<Self> {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(HEADER)?;
        Ok(Self { writer })
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    pub fn into_inner(self) -> io::Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| io::Error::other(e.to_string()))
    }
}

impl<W: Write> RowSink for CsvSink<W> {
    fn write_row(&mut self, row: &Row) -> io::Result<()> {
        self.writer.write_record([
            row.key.as_str(),
            row.source.as_str(),
            row.translation.as_str(),
            row.context.as_str(),
        ])?;
        Ok(())
    }
}
