use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use csv::{ReaderBuilder, Terminator, WriterBuilder};

use crate::errors::{self, InputError};

const BOM: &str = "\u{feff}";

/// One data row keyed by header name. A column missing from the header (or a
/// ragged row) reads as `None`, a blank cell as `Some("")`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableRow {
    cells: HashMap<String, String>,
}

impl TableRow {
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        Self {
            cells: pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }
}

/// A header-addressed delimited text file, held fully in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<TableRow>,
}

impl Table {
    /// Read a UTF-8 file, tolerating a leading byte-order mark.
    pub fn read(path: &Path) -> Result<Self, InputError> {
        if !path.exists() {
            return Err(InputError::Missing(path.to_path_buf()));
        }
        let text = fs::read_to_string(path).map_err(|source| InputError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text).map_err(|source| InputError::Malformed {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(text: &str) -> csv::Result<Self> {
        let text = text.strip_prefix(BOM).unwrap_or(text);
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let mut cells = HashMap::with_capacity(headers.len());
            for (header, value) in headers.iter().zip(record.iter()) {
                cells.insert(header.clone(), value.to_string());
            }
            rows.push(TableRow { cells });
        }

        Ok(Self { headers, rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Serialize a header and rows: BOM, CRLF line ends, quoting only where needed.
pub fn render(header: &[String], rows: &[Vec<String>]) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    buffer.write_all(BOM.as_bytes())?;

    let mut writer = WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .from_writer(buffer);
    writer.write_record(header)?;
    for row in rows {
        writer.write_record(row)?;
    }

    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush rendered table: {}", e.error()))
}

pub fn write(path: &Path, header: &[String], rows: &[Vec<String>]) -> Result<()> {
    let bytes = render(header, rows)?;
    fs::write(path, bytes).with_context(|| errors::write_context("ledger", path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strips_bom_and_keeps_blank_cells() {
        let table = Table::parse("\u{feff}日付,半荘,坂井\r\n2024/3/5,1,\r\n").unwrap();

        assert_eq!(table.headers, ["日付", "半荘", "坂井"]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0].get("日付"), Some("2024/3/5"));
        assert_eq!(table.rows[0].get("坂井"), Some(""));
        assert_eq!(table.rows[0].get("中江"), None);
    }

    #[test]
    fn test_parse_tolerates_ragged_rows() {
        let table = Table::parse("a,b,c\n1,2\n1,2,3\n").unwrap();

        assert_eq!(table.rows[0].get("b"), Some("2"));
        assert_eq!(table.rows[0].get("c"), None);
        assert_eq!(table.rows[1].get("c"), Some("3"));
    }

    #[test]
    fn test_render_layout() {
        let header = vec!["日付".to_string(), "半荘".to_string()];
        let rows = vec![vec!["2024/3/5".to_string(), "1,2".to_string()]];

        let bytes = render(&header, &rows).unwrap();

        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "\u{feff}日付,半荘\r\n2024/3/5,\"1,2\"\r\n"
        );
    }

    #[test]
    fn test_read_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Table::read(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, InputError::Missing(_)));
    }

    #[test]
    fn test_written_table_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.csv");
        let header = vec!["x".to_string(), "y".to_string()];

        write(&path, &header, &[vec!["1".to_string(), String::new()]]).unwrap();
        let table = Table::read(&path).unwrap();

        assert_eq!(table.headers, header);
        assert_eq!(table.rows[0].get("x"), Some("1"));
        assert_eq!(table.rows[0].get("y"), Some(""));
    }
}
