//! # doctable
//!
//! Column-driven table rendering for diagnostic CLI output.
//!
//! This library is the output-formatting core of a cluster inspection tool:
//! it turns heterogeneous records (typed values or schema-less JSON
//! documents) into aligned text tables, with per-column extraction
//! expressions, composable formatter stages, and a tree-grouping convention
//! for hierarchical results. Data collection is the caller's business; the
//! crate is a pure, single-pass transform over records already in memory.
//!
//! ## Overview
//!
//! - **Columns** bind a case-insensitive header to an extraction strategy
//!   and an optional formatter chain. Extraction paths use a small jq-style
//!   language (`.status.conditions[]? | select(.type=="Ready") | .status`),
//!   compiled once at configuration time.
//! - **Records** are anything implementing the [`Record`] capability;
//!   `serde_json::Value` documents work out of the box.
//! - The **renderer** buffers rows in insertion order and writes an aligned
//!   table to any `io::Write` sink.
//! - The **report** layer adapts categorized diagnostic outcomes into
//!   colorized, tree-grouped tables or machine-readable JSON.
//!
//! Configuration mistakes (malformed expressions, duplicate headers) fail
//! at setup time; per-cell problems render as descriptive cell text so one
//! malformed value never costs the rest of the table.
//!
//! ## Example
//!
//! ```rust
//! use doctable::{Column, Renderer};
//! use serde_json::json;
//!
//! let components = vec![
//!     json!({
//!         "kind": "Dashboard",
//!         "status": {"conditions": [{"type": "Ready", "status": "True"}]}
//!     }),
//!     json!({"kind": "Kserve"}),
//! ];
//!
//! let mut out = Vec::new();
//! let mut renderer = Renderer::with_columns(
//!     &mut out,
//!     vec![
//!         Column::new("TYPE").with_path(".kind")?,
//!         Column::new("READY").with_path(
//!             r#".status.conditions[]? | select(.type=="Ready") | .status // "Unknown""#,
//!         )?,
//!     ],
//! )?;
//! renderer.append_all(&components)?;
//! renderer.render()?;
//!
//! let table = String::from_utf8(out).unwrap();
//! assert_eq!(table, "TYPE       READY\nDashboard  True\nKserve     Unknown\n");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod query;
pub mod report;
pub mod table;

pub use error::DoctableError;
pub use query::{EvalError, ParseError, Query};
pub use report::{
    printer_for, status_stage, Category, Check, CheckResults, JsonPrinter, OutputFormat, Printer,
    Status, Summary, TablePrinter,
};
pub use table::{chain, display_value, tree_prefix, Column, Record, Renderer, Stage, TableConfig};

/// Result type for doctable operations
pub type Result<T> = std::result::Result<T, DoctableError>;
