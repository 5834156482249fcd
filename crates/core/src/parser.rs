//! Delimited text parser for report documents
//!
//! Reports arrive as flat text: one header line, then one line per record.
//!
//! # Known limitation
//!
//! Splitting is a plain delimiter split. There is no quoting or escaping, so a
//! cell that itself contains the delimiter shifts every following column of
//! that line.

use spgate_domain::Row;
use tracing::debug;

/// Splits report bodies into header-keyed rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimitedTextParser {
    delimiter: char,
}

impl Default for DelimitedTextParser {
    fn default() -> Self {
        Self { delimiter: ',' }
    }
}

impl DelimitedTextParser {
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }

    /// Parser for tab-separated flat files.
    pub fn tab() -> Self {
        Self::new('\t')
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Parse a document body.
    ///
    /// - Lines are split on `\n`; whitespace-only lines are skipped
    /// - The first remaining line is the header
    /// - Headers and cells are trimmed of surrounding whitespace
    /// - Missing trailing cells become `""`; surplus cells are dropped
    /// - Fewer than two non-blank lines yields no rows
    pub fn parse(&self, body: &str) -> Vec<Row> {
        let mut lines = body.split('\n').filter(|line| !line.trim().is_empty());

        let Some(header_line) = lines.next() else {
            debug!("Report body is empty");
            return Vec::new();
        };
        let headers: Vec<&str> = header_line.split(self.delimiter).map(str::trim).collect();

        let rows: Vec<Row> = lines
            .map(|line| {
                let mut values = line.split(self.delimiter).map(str::trim);
                let mut row = Row::with_capacity(headers.len());
                for header in &headers {
                    row.insert(*header, values.next().unwrap_or(""));
                }
                row
            })
            .collect();

        debug!(columns = headers.len(), rows = rows.len(), "Parsed report body");
        rows
    }
}
