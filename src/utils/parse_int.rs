/// Parse a numeric form input. Blank, negative or non-numeric input yields
/// `None`, so callers keep the previous value.
pub fn parse_form_u32(value: Option<&str>) -> Option<u32> {
    value.and_then(|v| {
        let t = v.trim();
        if t.is_empty() {
            None
        } else {
            t.parse::<u32>().ok()
        }
    })
}
