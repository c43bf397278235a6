//! Tabular rendering: columns, formatter stages, records, and the renderer.
//!
//! This module is the core of the crate. The pieces compose as follows:
//!
//! - **[`Column`]**: binds a display header to an extraction strategy (the
//!   header itself for typed records, an optional query path for structured
//!   navigation) and a chain of formatter [`Stage`]s.
//! - **[`Record`]**: the capability a type needs to be rendered; documents
//!   (`serde_json::Value`) have a built-in implementation.
//! - **[`Renderer`]**: accumulates rows in insertion order and writes an
//!   aligned table to its sink. [`tree_prefix`] provides the connector
//!   glyphs for tree-grouped rows.
//!
//! ## Example
//!
//! ```rust
//! use doctable::{Column, Renderer};
//! use serde_json::json;
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
//!
//! renderer.append(&json!({
//!     "kind": "Dashboard",
//!     "status": {"conditions": [{"type": "Ready", "status": "True"}]}
//! }))?;
//! renderer.render()?;
//!
//! let table = String::from_utf8(out).unwrap();
//! assert_eq!(table, "TYPE       READY\nDashboard  True\n");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod column;
pub mod format;
pub mod record;
pub mod renderer;

pub use column::Column;
pub use format::{chain, display_value, Stage};
pub use record::Record;
pub use renderer::{tree_prefix, Renderer, TableConfig};
