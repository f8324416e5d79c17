//! Validate tool-call arguments against the declared JSON Schema.

/// Check an argument payload against a schema before the handler runs.
///
/// Top-level validation only: schema type, required-field presence, and
/// property type agreement. Returns the first violation found.
pub fn validate_arguments(
    args: &serde_json::Value,
    schema: &serde_json::Value,
) -> Result<(), String> {
    if schema.get("type").and_then(|v| v.as_str()) == Some("object") && !args.is_object() {
        return Err(format!("expected object arguments, got {}", type_name(args)));
    }

    let Some(obj) = args.as_object() else {
        return Ok(());
    };

    if let Some(required) = schema.get("required").and_then(|v| v.as_array()) {
        for field in required.iter().filter_map(|f| f.as_str()) {
            if !obj.contains_key(field) {
                return Err(format!("missing required field '{field}'"));
            }
        }
    }

    if let Some(properties) = schema.get("properties").and_then(|v| v.as_object()) {
        for (key, value) in obj {
            let Some(expected) = properties
                .get(key)
                .and_then(|p| p.get("type"))
                .and_then(|t| t.as_str())
            else {
                continue;
            };
            if !matches_type(value, expected) {
                return Err(format!(
                    "field '{key}' expected type '{expected}', got {}",
                    type_name(value)
                ));
            }
        }
    }

    Ok(())
}

fn matches_type(value: &serde_json::Value, expected: &str) -> bool {
    match expected {
        "string" => value.is_string(),
        "number" => value.is_number(),
        "integer" => value.is_i64() || value.is_u64(),
        "boolean" => value.is_boolean(),
        "object" => value.is_object(),
        "array" => value.is_array(),
        "null" => value.is_null(),
        _ => true,
    }
}

fn type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn topic_schema() -> serde_json::Value {
        json!({
            "type": "object",
            "properties": { "topic": { "type": "string" } },
            "required": ["topic"],
        })
    }

    #[test]
    fn rejects_non_object_args_when_schema_expects_object() {
        let result = validate_arguments(&json!("bitcoin"), &topic_schema());
        assert!(result.unwrap_err().contains("expected object"));
    }

    #[test]
    fn rejects_missing_required_field() {
        let result = validate_arguments(&json!({}), &topic_schema());
        assert!(result.unwrap_err().contains("missing required field 'topic'"));
    }

    #[test]
    fn rejects_field_with_wrong_type() {
        let result = validate_arguments(&json!({ "topic": 42 }), &topic_schema());
        let err = result.unwrap_err();
        assert!(err.contains("field 'topic'"));
        assert!(err.contains("expected type 'string'"));
    }

    #[test]
    fn accepts_valid_args() {
        assert!(validate_arguments(&json!({ "topic": "bitcoin" }), &topic_schema()).is_ok());
    }

    #[test]
    fn accepts_extra_fields_not_in_schema() {
        let args = json!({ "topic": "bitcoin", "page": 2 });
        assert!(validate_arguments(&args, &topic_schema()).is_ok());
    }

    #[test]
    fn accepts_anything_against_an_empty_schema() {
        assert!(validate_arguments(&json!({ "whatever": true }), &json!({})).is_ok());
        assert!(validate_arguments(&serde_json::Value::Null, &json!({})).is_ok());
    }
}
