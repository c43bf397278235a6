//! The record capability: what a type must provide to be rendered as a row.
//!
//! Instead of reflecting over arbitrary types, the renderer asks each record
//! for a value by case-insensitive field name. Typed records implement
//! [`Record`] per concrete type; semi-structured documents get the single
//! generic implementation on `serde_json::Value`.

use serde_json::Value;

/// A renderable input item.
///
/// Implementations must be read-only: the renderer never mutates caller
/// data, and `field`/`document` are called once per cell per append.
pub trait Record {
    /// The value for a case-insensitive field name, if the record has one.
    ///
    /// When two fields differ only by case the first match wins; such types
    /// should not be exposed to the renderer in the first place.
    fn field(&self, name: &str) -> Option<Value>;

    /// The whole record as a structured value, used as the base for query
    /// navigation. Typed records return `None`: their query base is the
    /// field matched by the column header.
    fn document(&self) -> Option<Value> {
        None
    }
}

impl Record for Value {
    fn field(&self, name: &str) -> Option<Value> {
        match self {
            Value::Object(map) => map
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value.clone()),
            _ => None,
        }
    }

    fn document(&self) -> Option<Value> {
        Some(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_field_lookup_is_case_insensitive() {
        let doc = json!({"Name": "Alice", "Age": 30});
        assert_eq!(doc.field("name"), Some(json!("Alice")));
        assert_eq!(doc.field("NAME"), Some(json!("Alice")));
        assert_eq!(doc.field("Name"), Some(json!("Alice")));
        assert_eq!(doc.field("missing"), None);
    }

    #[test]
    fn test_first_case_insensitive_match_wins() {
        let doc = json!({"name": "first", "NAME": "second"});
        assert_eq!(doc.field("Name"), Some(json!("first")));
    }

    #[test]
    fn test_non_object_has_no_fields() {
        assert_eq!(json!("scalar").field("name"), None);
        assert_eq!(json!([1, 2]).field("name"), None);
    }

    #[test]
    fn test_document_exposes_whole_value() {
        let doc = json!({"kind": "Dashboard"});
        assert_eq!(doc.document(), Some(doc.clone()));
    }
}
