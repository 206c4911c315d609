use serde_json::Value;

/// One API result row (trace, observation, score, ...).
///
/// serde_json's `preserve_order` feature keeps the field order the API
/// returned, which table and TSV rendering rely on for stable columns.
pub type Record = serde_json::Map<String, Value>;

/// Look up a value by dot-separated path ("usage.totalTokens").
pub fn deep_get<'a>(record: &'a Record, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = record.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Format a field value for table/TSV cells.
///
/// Nulls render as empty cells; arrays and objects collapse to compact JSON
/// so one record always occupies one line.
pub fn field_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => serde_json::to_string(other).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn deep_get_traverses_nested_objects() {
        let rec = record(json!({"usage": {"totalTokens": 42}}));
        assert_eq!(deep_get(&rec, "usage.totalTokens"), Some(&json!(42)));
        assert_eq!(deep_get(&rec, "usage.missing"), None);
        assert_eq!(deep_get(&rec, "nope"), None);
    }

    #[test]
    fn deep_get_stops_at_non_objects() {
        let rec = record(json!({"name": "run"}));
        assert_eq!(deep_get(&rec, "name.inner"), None);
    }

    #[test]
    fn field_text_formats_scalars_and_collections() {
        assert_eq!(field_text(None), "");
        assert_eq!(field_text(Some(&Value::Null)), "");
        assert_eq!(field_text(Some(&json!("abc"))), "abc");
        assert_eq!(field_text(Some(&json!(true))), "true");
        assert_eq!(field_text(Some(&json!(1.5))), "1.5");
        assert_eq!(field_text(Some(&json!(["a", "b"]))), r#"["a","b"]"#);
    }
}
