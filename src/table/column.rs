//! Column definitions: a display header bound to an extraction strategy and
//! an optional formatter chain.

use serde_json::Value;

use crate::error::DoctableError;
use crate::query::Query;
use crate::table::format::{display_value, Stage};
use crate::table::record::Record;
use crate::Result;

/// One column of the output table.
///
/// The header doubles as the column's identity (case-insensitive) and as the
/// field name matched against typed records. An extraction path, when set,
/// is compiled eagerly so a bad expression fails at configuration time.
#[derive(Debug)]
pub struct Column {
    header: String,
    query: Option<Query>,
    stages: Vec<Stage>,
}

impl Column {
    /// Create a column with the given header.
    pub fn new(header: impl Into<String>) -> Self {
        Column {
            header: header.into(),
            query: None,
            stages: Vec::new(),
        }
    }

    /// Attach an extraction path, compiling it now.
    pub fn with_path(mut self, expression: &str) -> Result<Self> {
        let query = Query::parse(expression).map_err(|err| DoctableError::InvalidQuery {
            expression: expression.to_string(),
            message: err.to_string(),
        })?;
        self.query = Some(query);
        Ok(self)
    }

    /// Attach a pre-compiled extraction query.
    pub fn with_query(mut self, query: Query) -> Self {
        self.query = Some(query);
        self
    }

    /// Append a formatter stage to this column's chain.
    ///
    /// Stages run left to right in the order they were added, after
    /// extraction and before display conversion.
    pub fn with_stage(mut self, stage: Stage) -> Self {
        self.stages.push(stage);
        self
    }

    /// The display header.
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Render one cell for a record.
    pub(crate) fn render_cell(&self, record: &dyn Record) -> String {
        let value = self.extract(record);
        self.finish(value)
    }

    /// Render one cell from an already-positioned base value.
    pub(crate) fn render_value(&self, base: Value) -> String {
        let value = match &self.query {
            Some(query) => apply_query(query, &base),
            None => base,
        };
        self.finish(value)
    }

    /// Locate the base value and run the extraction path, if any.
    ///
    /// Documents expose themselves whole as the query base; typed records
    /// contribute the field matched (case-insensitively) by the header. A
    /// header with no matching field and no path is an empty cell, not an
    /// error.
    fn extract(&self, record: &dyn Record) -> Value {
        match &self.query {
            Some(query) => {
                let base = record
                    .document()
                    .or_else(|| record.field(&self.header))
                    .unwrap_or(Value::Null);
                apply_query(query, &base)
            }
            None => record.field(&self.header).unwrap_or(Value::Null),
        }
    }

    fn finish(&self, value: Value) -> String {
        let value = self
            .stages
            .iter()
            .fold(value, |acc, stage| stage.apply(acc));
        display_value(&value)
    }
}

/// Fail-soft query application: empty stream renders empty, evaluation
/// errors render as their message.
fn apply_query(query: &Query, base: &Value) -> Value {
    match query.first(base) {
        Ok(Some(value)) => value,
        Ok(None) => Value::Null,
        Err(err) => Value::String(err.to_string()),
    }
}
