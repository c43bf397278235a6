//! Formatter stages: pure value transforms composed into per-column chains.
//!
//! A [`Stage`] maps one JSON value to another. Stages are total: one that
//! cannot interpret its input produces a descriptive string instead of
//! failing, so a malformed cell never aborts the rest of the table.

use std::fmt;

use console::Style;
use serde_json::Value;

use crate::query::Query;

/// A single formatter stage.
pub struct Stage(Box<dyn Fn(Value) -> Value + Send + Sync>);

impl Stage {
    /// Wrap an arbitrary pure transform.
    pub fn new(transform: impl Fn(Value) -> Value + Send + Sync + 'static) -> Self {
        Stage(Box::new(transform))
    }

    /// The identity stage.
    pub fn identity() -> Self {
        Stage::new(|value| value)
    }

    /// Apply this stage to a value.
    pub fn apply(&self, value: Value) -> Value {
        (self.0)(value)
    }

    /// Extraction as a pipeline stage: run a compiled query against the
    /// incoming value and keep the first output.
    ///
    /// An empty stream becomes `null` (an empty cell); an evaluation error
    /// becomes its message, rendered in place of the cell value.
    pub fn query(query: Query) -> Self {
        Stage::new(move |value| match query.first(&value) {
            Ok(Some(out)) => out,
            Ok(None) => Value::Null,
            Err(err) => Value::String(err.to_string()),
        })
    }

    /// Uppercase the display form of the value.
    pub fn uppercase() -> Self {
        Stage::new(|value| Value::String(display_value(&value).to_uppercase()))
    }

    /// Lowercase the display form of the value.
    pub fn lowercase() -> Self {
        Stage::new(|value| Value::String(display_value(&value).to_lowercase()))
    }

    /// Truncate the display form to at most `max` characters, marking the
    /// cut with `…`.
    pub fn truncate(max: usize) -> Self {
        Stage::new(move |value| {
            let text = display_value(&value);
            if text.chars().count() <= max {
                return Value::String(text);
            }
            let kept: String = text.chars().take(max.saturating_sub(1)).collect();
            Value::String(format!("{kept}…"))
        })
    }

    /// Apply a terminal style to the display form of the value.
    pub fn styled(style: Style) -> Self {
        Stage::new(move |value| {
            Value::String(style.apply_to(display_value(&value)).to_string())
        })
    }
}

impl fmt::Debug for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Stage(..)")
    }
}

/// Compose stages left to right: the output of each is the input of the next.
///
/// No stages is the identity; a single stage is returned unchanged.
pub fn chain(mut stages: Vec<Stage>) -> Stage {
    match stages.len() {
        0 => Stage::identity(),
        1 => stages.remove(0),
        _ => Stage::new(move |value| stages.iter().fold(value, |acc, stage| stage.apply(acc))),
    }
}

/// The display string for a final cell value.
///
/// Scalars render in their natural textual form, absent values as the empty
/// string, and structured values as compact JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}
