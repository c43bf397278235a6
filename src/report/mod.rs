//! Diagnostic result aggregates and their printers.
//!
//! This is the presentation layer on top of the tabular core: categorized
//! check outcomes ([`CheckResults`]) plus two interchangeable renderings,
//! a colorized tree-grouped table and pretty-printed JSON.
//!
//! ## Example
//!
//! ```rust
//! use doctable::{Category, CheckResults, OutputFormat, Status, printer_for};
//!
//! let results = CheckResults::from_categories(vec![Category {
//!     name: "components".to_string(),
//!     status: Status::Ok,
//!     message: "all components ready".to_string(),
//!     checks: vec![],
//! }]);
//!
//! let format: OutputFormat = "table".parse()?;
//! printer_for(format, std::io::stdout()).print_results(&results)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod printer;
pub mod types;

pub use printer::{printer_for, status_stage, JsonPrinter, OutputFormat, Printer, TablePrinter};
pub use types::{Category, Check, CheckResults, Status, Summary};
