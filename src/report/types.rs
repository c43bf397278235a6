//! Diagnostic result aggregates.
//!
//! These are the structured alternative to the rendered table: callers may
//! serialize a [`CheckResults`] directly (the JSON printer does exactly
//! that) or hand it to the table printer for human-readable output.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of a single check or category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "OK")]
    Ok,
    Warning,
    Error,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::Warning => "Warning",
            Status::Error => "Error",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One diagnostic check outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Check {
    pub name: String,
    pub status: Status,
    pub message: String,
}

/// A named group of related checks with an overall status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub status: Status,
    pub message: String,
    pub checks: Vec<Check>,
}

/// Counts of outcomes across categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub ok: usize,
    pub warning: usize,
    pub error: usize,
}

impl Summary {
    /// Summary of one category: its checks' statuses, or the category's own
    /// status when it has no checks.
    pub fn of_category(category: &Category) -> Summary {
        let mut summary = Summary::default();
        if category.checks.is_empty() {
            summary.record(category.status);
        } else {
            for check in &category.checks {
                summary.record(check.status);
            }
        }
        summary
    }

    pub fn record(&mut self, status: Status) {
        match status {
            Status::Ok => self.ok += 1,
            Status::Warning => self.warning += 1,
            Status::Error => self.error += 1,
        }
    }

    pub fn merge(&mut self, other: Summary) {
        self.ok += other.ok;
        self.warning += other.warning;
        self.error += other.error;
    }
}

/// The complete result of a diagnostic run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResults {
    pub categories: Vec<Category>,
    pub summary: Summary,
}

impl CheckResults {
    /// Aggregate per-category summaries into the overall summary.
    pub fn from_categories(categories: Vec<Category>) -> Self {
        let mut summary = Summary::default();
        for category in &categories {
            summary.merge(Summary::of_category(category));
        }
        CheckResults {
            categories,
            summary,
        }
    }
}
