use serde_json::Value;

/// Indented JSON, as shown verbatim in the creation result panel.
pub fn value_to_pretty_string(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::value_to_pretty_string;
    use serde_json::json;

    #[test]
    fn pretty_prints_objects() {
        let text = value_to_pretty_string(&json!({"success": true}));
        assert_eq!(text, "{\n  \"success\": true\n}");
    }
}
