/// Parse a boolean flag from an optional string value
pub fn parse_flag(value: Option<&str>, default: bool) -> bool {
    match value {
        Some(v) => {
            let t = v.trim().to_lowercase();
            if t.is_empty() {
                default
            } else {
                matches!(t.as_str(), "1" | "true" | "yes" | "on")
            }
        }
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::parse_flag;

    #[test]
    fn recognises_truthy_values() {
        assert!(parse_flag(Some("yes"), false));
        assert!(parse_flag(Some(" ON "), false));
        assert!(!parse_flag(Some("no"), true));
        assert!(parse_flag(Some(""), true));
        assert!(!parse_flag(None, false));
    }
}
