//! Stream evaluation of compiled expressions over JSON values.
//!
//! Every node maps zero or more input values to zero or more outputs.
//! Missing object keys and paths through `null` yield `null` rather than
//! failing; genuine type mismatches (indexing a scalar, iterating a number)
//! produce an [`EvalError`] that the table layer renders as cell text.

use serde_json::Value;
use thiserror::Error;

use super::parser::{CmpOp, Expr};

/// Runtime failure while evaluating a compiled query against a value.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct EvalError {
    pub message: String,
}

impl EvalError {
    fn new(message: impl Into<String>) -> Self {
        EvalError {
            message: message.into(),
        }
    }
}

/// JSON type name for error messages.
pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Everything except `null` and `false` is truthy.
pub(crate) fn is_truthy(value: &Value) -> bool {
    !matches!(value, Value::Null | Value::Bool(false))
}

pub(crate) fn eval(expr: &Expr, input: &Value, out: &mut Vec<Value>) -> Result<(), EvalError> {
    match expr {
        Expr::Identity => out.push(input.clone()),

        Expr::Field { name, optional } => match input {
            Value::Object(map) => {
                out.push(map.get(name).cloned().unwrap_or(Value::Null));
            }
            Value::Null => out.push(Value::Null),
            _ if *optional => {}
            other => {
                return Err(EvalError::new(format!(
                    "cannot index {} with \"{name}\"",
                    type_name(other)
                )));
            }
        },

        Expr::Index { index, optional } => match input {
            Value::Array(items) => {
                let idx = if *index < 0 {
                    items.len() as i64 + index
                } else {
                    *index
                };
                let value = if idx >= 0 {
                    items.get(idx as usize).cloned().unwrap_or(Value::Null)
                } else {
                    Value::Null
                };
                out.push(value);
            }
            Value::Null => out.push(Value::Null),
            _ if *optional => {}
            other => {
                return Err(EvalError::new(format!(
                    "cannot index {} with number",
                    type_name(other)
                )));
            }
        },

        Expr::Iterate { optional } => match input {
            Value::Array(items) => out.extend(items.iter().cloned()),
            Value::Object(map) => out.extend(map.values().cloned()),
            _ if *optional => {}
            other => {
                return Err(EvalError::new(format!(
                    "cannot iterate over {}",
                    type_name(other)
                )));
            }
        },

        Expr::Pipe(left, right) => {
            let mut intermediate = Vec::new();
            eval(left, input, &mut intermediate)?;
            for value in &intermediate {
                eval(right, value, out)?;
            }
        }

        Expr::Alt(left, right) => {
            // Truthy outputs of the left side win; an empty or erroring left
            // side falls back to the right.
            let mut left_out = Vec::new();
            let truthy: Vec<Value> = match eval(left, input, &mut left_out) {
                Ok(()) => left_out.into_iter().filter(is_truthy).collect(),
                Err(_) => Vec::new(),
            };
            if truthy.is_empty() {
                eval(right, input, out)?;
            } else {
                out.extend(truthy);
            }
        }

        Expr::Compare { op, left, right } => {
            let mut left_out = Vec::new();
            eval(left, input, &mut left_out)?;
            let mut right_out = Vec::new();
            eval(right, input, &mut right_out)?;
            for l in &left_out {
                for r in &right_out {
                    let matched = match op {
                        CmpOp::Eq => l == r,
                        CmpOp::Ne => l != r,
                    };
                    out.push(Value::Bool(matched));
                }
            }
        }

        Expr::Select(filter) => {
            let mut filter_out = Vec::new();
            eval(filter, input, &mut filter_out)?;
            if filter_out.iter().any(is_truthy) {
                out.push(input.clone());
            }
        }

        Expr::Join(separator) => {
            let Value::Array(items) = input else {
                return Err(EvalError::new(format!(
                    "cannot join {}",
                    type_name(input)
                )));
            };
            let mut sep_out = Vec::new();
            eval(separator, input, &mut sep_out)?;
            let sep = match sep_out.first() {
                Some(Value::String(s)) => s.clone(),
                Some(other) => {
                    return Err(EvalError::new(format!(
                        "join separator must be a string, got {}",
                        type_name(other)
                    )));
                }
                None => return Err(EvalError::new("join requires a separator")),
            };
            let mut parts = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::Null => parts.push(String::new()),
                    Value::String(s) => parts.push(s.clone()),
                    Value::Bool(b) => parts.push(b.to_string()),
                    Value::Number(n) => parts.push(n.to_string()),
                    other => {
                        return Err(EvalError::new(format!(
                            "cannot join {} elements",
                            type_name(other)
                        )));
                    }
                }
            }
            out.push(Value::String(parts.join(&sep)));
        }

        Expr::Literal(value) => out.push(value.clone()),
    }

    Ok(())
}
