use std::collections::BTreeMap;

/// Inserts `name: value`, dropping any existing key that differs only in
/// ASCII case. HTTP header names are case-insensitive, the map is not.
pub fn set_header(headers: &mut BTreeMap<String, String>, name: &str, value: impl Into<String>) {
    remove_header(headers, name);
    headers.insert(name.to_string(), value.into());
}

pub fn remove_header(headers: &mut BTreeMap<String, String>, name: &str) {
    headers.retain(|key, _| !key.eq_ignore_ascii_case(name));
}

pub fn overlay_headers(base: &mut BTreeMap<String, String>, overrides: &BTreeMap<String, String>) {
    for (name, value) in overrides {
        set_header(base, name, value.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_header_replaces_other_casings() {
        let mut headers = BTreeMap::from([
            ("Content-Type".to_string(), "application/json".to_string()),
            ("X-Trace".to_string(), "1".to_string()),
        ]);
        set_header(&mut headers, "content-type", "text/plain");
        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get("content-type").map(String::as_str), Some("text/plain"));
        assert!(!headers.contains_key("Content-Type"));
    }

    #[test]
    fn remove_header_ignores_case() {
        let mut headers = BTreeMap::from([("CONTENT-TYPE".to_string(), "x".to_string())]);
        remove_header(&mut headers, "Content-Type");
        assert!(headers.is_empty());
    }
}
