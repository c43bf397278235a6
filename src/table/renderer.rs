//! Row accumulation and aligned table rendering.
//!
//! A [`Renderer`] owns a validated [`TableConfig`] and a row buffer. Records
//! are rendered to display strings as they are appended (insertion order is
//! preserved); [`Renderer::render`] lays the buffered rows out under their
//! headers with content-sized columns and writes the result to the sink.

use std::collections::HashSet;
use std::io::Write;

use console::measure_text_width;
use serde_json::Value;

use crate::error::DoctableError;
use crate::table::column::Column;
use crate::table::record::Record;
use crate::Result;

/// Connector glyph for a child row in a tree-grouped table.
///
/// The last child of a group gets the terminating connector, every other
/// child the continuing one. Grouping is purely a first-column string
/// convention; the renderer itself knows nothing about parent/child rows.
pub fn tree_prefix(index: usize, count: usize) -> &'static str {
    if index + 1 == count {
        "└── "
    } else {
        "├── "
    }
}

/// Renderer configuration: the ordered columns and the separator written
/// between them.
///
/// One explicit value rather than an open-ended option list, so everything
/// can be validated before the first record is processed.
#[derive(Debug)]
pub struct TableConfig {
    pub columns: Vec<Column>,
    pub separator: String,
}

impl TableConfig {
    /// Configuration with the default two-space separator.
    pub fn new(columns: Vec<Column>) -> Self {
        TableConfig {
            columns,
            separator: "  ".to_string(),
        }
    }

    /// Override the column separator.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Reject empty tables, empty headers, and case-insensitive duplicates.
    fn validate(&self) -> Result<()> {
        if self.columns.is_empty() {
            return Err(DoctableError::NoColumns);
        }
        let mut seen = HashSet::new();
        for column in &self.columns {
            if column.header().is_empty() {
                return Err(DoctableError::EmptyHeader);
            }
            if !seen.insert(column.header().to_ascii_lowercase()) {
                return Err(DoctableError::DuplicateHeader(column.header().to_string()));
            }
        }
        Ok(())
    }
}

/// Accumulates rendered rows and writes them as an aligned table.
///
/// Column widths are computed from the maximum display width across the
/// header and every cell in the column, measured ANSI-aware so colorized
/// cells do not skew alignment. Rendering is deterministic for unchanged
/// state and does not consume the buffer.
#[derive(Debug)]
pub struct Renderer<W> {
    writer: W,
    config: TableConfig,
    rows: Vec<Vec<String>>,
}

impl<W: Write> Renderer<W> {
    /// Create a renderer, validating the configuration up front.
    pub fn new(writer: W, config: TableConfig) -> Result<Self> {
        config.validate()?;
        Ok(Renderer {
            writer,
            config,
            rows: Vec::new(),
        })
    }

    /// Convenience constructor with default layout options.
    pub fn with_columns(writer: W, columns: Vec<Column>) -> Result<Self> {
        Renderer::new(writer, TableConfig::new(columns))
    }

    /// Render one record into a row and buffer it.
    pub fn append(&mut self, record: &dyn Record) -> Result<()> {
        let row = self
            .config
            .columns
            .iter()
            .map(|column| column.render_cell(record))
            .collect();
        self.rows.push(row);
        Ok(())
    }

    /// Buffer a positional row: one value per column, in column order.
    ///
    /// Extraction paths and formatter chains still apply per column.
    pub fn append_row(&mut self, cells: Vec<Value>) -> Result<()> {
        if cells.len() != self.config.columns.len() {
            return Err(DoctableError::RowLength {
                expected: self.config.columns.len(),
                actual: cells.len(),
            });
        }
        let row = self
            .config
            .columns
            .iter()
            .zip(cells)
            .map(|(column, cell)| column.render_value(cell))
            .collect();
        self.rows.push(row);
        Ok(())
    }

    /// Append a sequence of records, stopping at the first failure.
    ///
    /// Not atomic: rows appended before the failing record are retained.
    pub fn append_all<'a, R, I>(&mut self, records: I) -> Result<()>
    where
        R: Record + 'a,
        I: IntoIterator<Item = &'a R>,
    {
        for record in records {
            self.append(record)?;
        }
        Ok(())
    }

    /// Number of buffered rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Write headers and buffered rows to the sink as an aligned table.
    pub fn render(&mut self) -> Result<()> {
        let headers: Vec<&str> = self
            .config
            .columns
            .iter()
            .map(|column| column.header())
            .collect();

        let mut widths: Vec<usize> = headers.iter().map(|h| measure_text_width(h)).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(measure_text_width(cell));
            }
        }

        let header_line = layout(&headers, &widths, &self.config.separator);
        writeln!(self.writer, "{header_line}")?;
        for row in &self.rows {
            let cells: Vec<&str> = row.iter().map(String::as_str).collect();
            let line = layout(&cells, &widths, &self.config.separator);
            writeln!(self.writer, "{line}")?;
        }
        Ok(())
    }
}

/// Pad every cell to its column width; the last column carries no trailing
/// padding, and an empty trailing cell leaves no trailing spaces behind.
fn layout(cells: &[&str], widths: &[usize], separator: &str) -> String {
    let mut line = String::new();
    let last = cells.len().saturating_sub(1);
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        line.push_str(cell);
        if i < last {
            let pad = width.saturating_sub(measure_text_width(cell));
            line.extend(std::iter::repeat(' ').take(pad));
            line.push_str(separator);
        }
    }
    line.truncate(line.trim_end_matches(' ').len());
    line
}
