//! Extraction and filter expressions over JSON-like values.
//!
//! This module implements the small jq-style sublanguage used by column
//! definitions: field paths, optional traversal, array iteration and
//! indexing, pipes, `select`, `join`, comparisons, and the `//` alternative
//! operator. Expressions are compiled once with [`Query::parse`] and the
//! resulting [`Query`] is evaluated per cell, side-effect free.
//!
//! ## Example
//!
//! ```rust
//! use doctable::Query;
//! use serde_json::json;
//!
//! let query = Query::parse(
//!     r#".status.conditions[]? | select(.type=="Ready") | .status // "Unknown""#,
//! )?;
//!
//! let component = json!({
//!     "kind": "Dashboard",
//!     "status": {"conditions": [{"type": "Ready", "status": "True"}]}
//! });
//! assert_eq!(query.first(&component)?, Some(json!("True")));
//!
//! // A record with no conditions falls back to the pipeline-wide default.
//! assert_eq!(query.first(&json!({}))?, Some(json!("Unknown")));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod eval;
mod parser;

use serde_json::Value;

pub use eval::EvalError;
pub use parser::ParseError;

/// A compiled extraction expression.
///
/// Immutable after compilation; evaluation takes `&self` and carries no
/// shared mutable state, so a `Query` may be reused across rows (and read
/// concurrently, although rendering itself is single-threaded).
///
/// One deliberate divergence from jq: `//` binds looser than `|`, so
/// `a | b // c` means "the pipeline `a | b`, defaulting to `c` when it
/// yields no truthy output".
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    source: String,
    ast: parser::Expr,
}

impl Query {
    /// Compile an expression.
    ///
    /// A malformed expression is a configuration error; it is reported here,
    /// at setup time, never during rendering.
    pub fn parse(expression: &str) -> Result<Self, ParseError> {
        let ast = parser::parse(expression)?;
        Ok(Query {
            source: expression.to_string(),
            ast,
        })
    }

    /// Evaluate against a value, yielding the full output stream.
    pub fn evaluate(&self, input: &Value) -> Result<Vec<Value>, EvalError> {
        let mut out = Vec::new();
        eval::eval(&self.ast, input, &mut out)?;
        Ok(out)
    }

    /// Evaluate and keep only the first output, if any.
    ///
    /// This is what cell extraction consumes: an empty stream means "no
    /// value" and renders as an empty cell.
    pub fn first(&self, input: &Value) -> Result<Option<Value>, EvalError> {
        Ok(self.evaluate(input)?.into_iter().next())
    }

    /// The original expression text.
    pub fn source(&self) -> &str {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_and_first() {
        let query = Query::parse(".kind").unwrap();
        assert_eq!(query.source(), ".kind");
        assert_eq!(
            query.first(&json!({"kind": "Dashboard"})).unwrap(),
            Some(json!("Dashboard"))
        );
    }

    #[test]
    fn test_first_of_empty_stream() {
        let query = Query::parse(".items[]?").unwrap();
        assert_eq!(query.first(&json!({})).unwrap(), None);
    }

    #[test]
    fn test_evaluate_yields_all_outputs() {
        let query = Query::parse(".[]").unwrap();
        assert_eq!(
            query.evaluate(&json!([1, 2, 3])).unwrap(),
            vec![json!(1), json!(2), json!(3)]
        );
    }

    #[test]
    fn test_bad_expression_is_a_parse_error() {
        let err = Query::parse(".items[").unwrap_err();
        assert!(err.to_string().contains("parse error"));
    }

    #[test]
    fn test_query_is_reusable() {
        let query = Query::parse(".name").unwrap();
        for name in ["a", "b", "c"] {
            assert_eq!(
                query.first(&json!({"name": name})).unwrap(),
                Some(json!(name))
            );
        }
    }
}
