use std::io::Read;

use csv::{StringRecord, Trim};

use super::LoadError;

/// Remove every occurrence of the stray separator characters from `text`.
///
/// Upstream exports pad comma-delimited fields with extra separator
/// characters (tabs by default); they carry no data and break CSV parsing of
/// numeric fields unless removed first.
pub fn strip_stray_separators(text: &str, stray: &str) -> String {
    if stray.is_empty() {
        return text.to_string();
    }
    text.chars().filter(|c| !stray.contains(*c)).collect()
}

/// A parsed CSV table with trimmed headers, addressed by column name
#[derive(Debug, Clone)]
pub struct RawTable {
    name: String,
    headers: Vec<String>,
    rows: Vec<(u64, StringRecord)>,
}

impl RawTable {
    /// Read a polluted CSV source, stripping stray separators before parsing
    pub fn from_reader<R: Read>(name: &str, mut reader: R, stray: &str) -> Result<Self, LoadError> {
        let mut contents = String::new();
        reader.read_to_string(&mut contents)?;
        let cleaned = strip_stray_separators(&contents, stray);

        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(cleaned.as_bytes());

        let headers: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            rows.push((line, record));
        }

        Ok(Self {
            name: name.to_string(),
            headers,
            rows,
        })
    }

    /// Table name used in error messages
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Trimmed header names in source order
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a required column
    pub fn column(&self, column: &str) -> Result<usize, LoadError> {
        self.headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| LoadError::MissingColumn {
                file: self.name.clone(),
                column: column.to_string(),
            })
    }

    /// Data rows with their source line numbers
    pub fn rows(&self) -> impl Iterator<Item = &(u64, StringRecord)> {
        self.rows.iter()
    }

    pub(super) fn malformed(&self, line: u64, message: impl Into<String>) -> LoadError {
        LoadError::MalformedRow {
            file: self.name.clone(),
            line,
            message: message.into(),
        }
    }

    /// Field `index` of `record` as a trimmed string slice
    pub(super) fn field<'a>(
        &self,
        line: u64,
        record: &'a StringRecord,
        index: usize,
        column: &str,
    ) -> Result<&'a str, LoadError> {
        record
            .get(index)
            .map(str::trim)
            .ok_or_else(|| self.malformed(line, format!("missing value for '{}'", column)))
    }
}
