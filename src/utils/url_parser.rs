/// Host (and port) part of a URL, for display in the page header.
pub fn hostname_from_url(u: &str) -> String {
    let s = u.trim();
    let s = match s.find("://") {
        Some(idx) => &s[idx + 3..],
        None => s,
    };
    s.split('/').next().unwrap_or(s).to_string()
}

#[cfg(test)]
mod tests {
    use super::hostname_from_url;

    #[test]
    fn strips_scheme_and_path() {
        assert_eq!(hostname_from_url("http://localhost:5000/api"), "localhost:5000");
        assert_eq!(hostname_from_url("backend.internal"), "backend.internal");
        assert_eq!(hostname_from_url("  "), "");
    }
}
