//! Table and JSON printers for diagnostic results.
//!
//! The two printers are interchangeable behind [`printer_for`]: the same
//! accumulated [`CheckResults`] renders as a colorized, tree-grouped table
//! or serializes as-is for machine consumption.

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use console::Style;
use serde_json::Value;

use crate::error::DoctableError;
use crate::report::types::CheckResults;
use crate::table::format::Stage;
use crate::table::renderer::{tree_prefix, Renderer, TableConfig};
use crate::table::Column;
use crate::Result;

/// Output format selection, typically driven by a CLI flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl FromStr for OutputFormat {
    type Err = DoctableError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => Err(DoctableError::InvalidFormat(other.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => f.write_str("table"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

/// Renders diagnostic results to a sink.
pub trait Printer {
    fn print_results(&mut self, results: &CheckResults) -> Result<()>;
}

/// Select a printer implementation for the requested format.
pub fn printer_for<W: Write + 'static>(format: OutputFormat, out: W) -> Box<dyn Printer> {
    match format {
        OutputFormat::Table => Box::new(TablePrinter::new(out)),
        OutputFormat::Json => Box::new(JsonPrinter::new(out)),
    }
}

/// Colorize the closed set of status values; anything else passes through
/// unmodified, so an unexpected status never blocks diagnostic output.
pub fn status_stage() -> Stage {
    let ok = Style::new().green();
    let warning = Style::new().yellow().bright();
    let error = Style::new().red();
    Stage::new(move |value| {
        let Value::String(text) = &value else {
            return value;
        };
        let styled = match text.as_str() {
            "OK" => ok.apply_to(text.as_str()),
            "Warning" => warning.apply_to(text.as_str()),
            "Error" => error.apply_to(text.as_str()),
            _ => return value,
        };
        Value::String(styled.to_string())
    })
}

/// Human-readable output: CHECK/STATUS/MESSAGE with checks tree-grouped
/// under their category.
pub struct TablePrinter<W> {
    out: W,
}

impl<W: Write> TablePrinter<W> {
    pub fn new(out: W) -> Self {
        TablePrinter { out }
    }
}

impl<W: Write> Printer for TablePrinter<W> {
    fn print_results(&mut self, results: &CheckResults) -> Result<()> {
        let columns = vec![
            Column::new("CHECK"),
            Column::new("STATUS").with_stage(status_stage()),
            Column::new("MESSAGE"),
        ];
        let mut renderer = Renderer::new(&mut self.out, TableConfig::new(columns))?;

        for category in &results.categories {
            renderer.append_row(vec![
                Value::String(category.name.clone()),
                Value::String(category.status.to_string()),
                Value::String(category.message.clone()),
            ])?;

            for (index, check) in category.checks.iter().enumerate() {
                let prefix = tree_prefix(index, category.checks.len());
                renderer.append_row(vec![
                    Value::String(format!("{prefix}{}", check.name)),
                    Value::String(check.status.to_string()),
                    Value::String(check.message.clone()),
                ])?;
            }
        }

        renderer.render()
    }
}

/// Machine-readable output: the results aggregate, pretty-printed as JSON.
pub struct JsonPrinter<W> {
    out: W,
}

impl<W: Write> JsonPrinter<W> {
    pub fn new(out: W) -> Self {
        JsonPrinter { out }
    }
}

impl<W: Write> Printer for JsonPrinter<W> {
    fn print_results(&mut self, results: &CheckResults) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.out, results)?;
        self.out.write_all(b"\n")?;
        Ok(())
    }
}
