//! CSV output for exported records
//!
//! Minimal-quoting CSV: a field is quoted only when it contains the
//! delimiter, a quote, or a line break, with embedded quotes doubled.

use super::types::ExportRecord;
use crate::error::Result;
use std::io::Write;
use std::path::Path;

/// Writes export records as CSV
#[derive(Debug, Clone)]
pub struct CsvWriter {
    delimiter: char,
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self { delimiter: ',' }
    }
}

impl CsvWriter {
    /// Create a writer with the default comma delimiter
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with a custom delimiter
    pub fn with_delimiter(delimiter: char) -> Self {
        Self { delimiter }
    }

    /// Write a header row and all records
    pub fn write<W: Write>(
        &self,
        mut out: W,
        header: &[String],
        records: &[ExportRecord],
    ) -> Result<()> {
        self.write_row(&mut out, header.iter().map(String::as_str))?;
        for record in records {
            self.write_row(&mut out, record.values.iter().map(String::as_str))?;
        }
        out.flush()?;
        Ok(())
    }

    /// Write header and records to a file path
    pub fn write_to_path(
        &self,
        path: impl AsRef<Path>,
        header: &[String],
        records: &[ExportRecord],
    ) -> Result<()> {
        let file = std::fs::File::create(path)?;
        self.write(std::io::BufWriter::new(file), header, records)
    }

    /// Write one row
    fn write_row<'a, W: Write>(
        &self,
        out: &mut W,
        fields: impl Iterator<Item = &'a str>,
    ) -> Result<()> {
        let mut first = true;
        for field in fields {
            if !first {
                write!(out, "{}", self.delimiter)?;
            }
            first = false;
            write!(out, "{}", escape_field(field, self.delimiter))?;
        }
        writeln!(out)?;
        Ok(())
    }
}

/// Quote a field if it needs it, doubling embedded quotes
fn escape_field(field: &str, delimiter: char) -> String {
    let needs_quoting =
        field.contains(delimiter) || field.contains('"') || field.contains('\n') || field.contains('\r');

    if needs_quoting {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod escape_tests {
    use super::escape_field;

    #[test]
    fn test_plain_fields_pass_through() {
        assert_eq!(escape_field("hello", ','), "hello");
        assert_eq!(escape_field("", ','), "");
    }

    #[test]
    fn test_delimiter_triggers_quoting() {
        assert_eq!(escape_field("a,b", ','), "\"a,b\"");
        assert_eq!(escape_field("a;b", ';'), "\"a;b\"");
        // A comma is plain under a semicolon delimiter.
        assert_eq!(escape_field("a,b", ';'), "a,b");
    }

    #[test]
    fn test_quotes_are_doubled() {
        assert_eq!(escape_field("say \"hi\"", ','), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_newlines_trigger_quoting() {
        assert_eq!(escape_field("line1\nline2", ','), "\"line1\nline2\"");
    }
}
