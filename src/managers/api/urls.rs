use std::collections::BTreeMap;
use url::form_urlencoded::byte_serialize;

fn encode_component(raw: &str) -> String {
    // byte_serialize writes spaces as '+'; a literal '+' is already %2B.
    byte_serialize(raw.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

pub fn encode_query(params: &BTreeMap<String, String>) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{}={}", encode_component(key), encode_component(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Joins base and endpoint with exactly one `/`, stripping at most one
/// trailing slash from the base and one leading slash from the endpoint.
pub fn build_url(
    base_url: &str,
    endpoint: &str,
    query: Option<&BTreeMap<String, String>>,
) -> String {
    let base = base_url.strip_suffix('/').unwrap_or(base_url);
    let path = endpoint.strip_prefix('/').unwrap_or(endpoint);
    let mut url = format!("{}/{}", base, path);
    if let Some(params) = query.filter(|p| !p.is_empty()) {
        url.push('?');
        url.push_str(&encode_query(params));
    }
    url
}
