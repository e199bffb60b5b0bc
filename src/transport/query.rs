use serde_json::Value;

/// Flatten a JSON object into deepObject-style query pairs, in key order.
///
/// `{"page": {"number": 2}, "filter": {"status": {"eq": "active"}}}` becomes
/// `page[number]=2` and `filter[status][eq]=active`. Nulls are skipped, arrays of
/// scalars are joined with commas and arrays of objects are indexed (`key[0][field]`).
pub fn encode_query(value: &Value) -> Vec<(String, String)> {
    let mut pairs = Vec::<(String, String)>::new();
    if let Value::Object(map) = value {
        for (key, value) in map {
            push_value(&mut pairs, key.clone(), value);
        }
    }
    pairs
}

fn push_value(pairs: &mut Vec<(String, String)>, key: String, value: &Value) {
    match value {
        Value::Null => {}
        Value::Object(map) => {
            for (child, value) in map {
                push_value(pairs, format!("{key}[{child}]"), value);
            }
        }
        Value::Array(items) if items.iter().all(is_scalar) => {
            let joined = items
                .iter()
                .filter_map(scalar_to_string)
                .collect::<Vec<_>>()
                .join(",");
            pairs.push((key, joined));
        }
        Value::Array(items) => {
            for (idx, item) in items.iter().enumerate() {
                push_value(pairs, format!("{key}[{idx}]"), item);
            }
        }
        scalar => {
            if let Some(text) = scalar_to_string(scalar) {
                pairs.push((key, text));
            }
        }
    }
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Object(_) | Value::Array(_))
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number.to_string()),
        Value::Null | Value::Object(_) | Value::Array(_) => None,
    }
}
