use crate::constants::http::AUTHORIZATION;
use crate::errors::ToolError;
use crate::services::config_store::{ApiConfig, Authentication};
use crate::utils::headers::{overlay_headers, set_header};
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::collections::BTreeMap;

/// Header derived from the config's authentication, if its fields are
/// filled in. Incomplete credentials yield nothing rather than an error.
pub fn auth_header(auth: &Authentication) -> Option<(String, String)> {
    match auth {
        Authentication::Bearer { token } => {
            if token.is_empty() {
                return None;
            }
            Some((AUTHORIZATION.to_string(), format!("Bearer {}", token)))
        }
        Authentication::ApiKey {
            api_key,
            header_name,
        } => {
            if api_key.is_empty() || header_name.is_empty() {
                return None;
            }
            Some((header_name.clone(), api_key.clone()))
        }
        Authentication::Basic { username, password } => {
            if username.is_empty() || password.is_empty() {
                return None;
            }
            let encoded = base64::engine::general_purpose::STANDARD
                .encode(format!("{}:{}", username, password));
            Some((AUTHORIZATION.to_string(), format!("Basic {}", encoded)))
        }
    }
}

/// Effective headers for one request. Precedence, lowest first: config
/// headers, authentication, per-call headers.
pub fn build_headers(
    config: &ApiConfig,
    additional: Option<&BTreeMap<String, String>>,
) -> BTreeMap<String, String> {
    let mut headers = config.headers.clone();
    if let Some((name, value)) = config.authentication.as_ref().and_then(auth_header) {
        set_header(&mut headers, &name, value);
    }
    if let Some(additional) = additional {
        overlay_headers(&mut headers, additional);
    }
    headers
}

pub fn to_header_map(headers: &BTreeMap<String, String>) -> Result<HeaderMap, ToolError> {
    let mut map = HeaderMap::new();
    for (key, value) in headers {
        let name = HeaderName::from_bytes(key.as_bytes())
            .map_err(|_| ToolError::invalid_params(format!("Invalid header name: {}", key)))?;
        let val = HeaderValue::from_str(value).map_err(|_| {
            ToolError::invalid_params(format!("Invalid value for header {}", key))
        })?;
        map.insert(name, val);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(headers: &[(&str, &str)], authentication: Option<Authentication>) -> ApiConfig {
        ApiConfig {
            name: "svc".to_string(),
            base_url: "https://api.example.com".to_string(),
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            authentication,
        }
    }

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn per_call_headers_win_over_config_and_auth() {
        let cfg = config(
            &[("X", "a")],
            Some(Authentication::Bearer {
                token: "T".to_string(),
            }),
        );
        let built = build_headers(&cfg, Some(&map(&[("X", "b"), ("Authorization", "Z")])));
        assert_eq!(built, map(&[("X", "b"), ("Authorization", "Z")]));
    }

    #[test]
    fn auth_overrides_config_header_of_any_casing() {
        let cfg = config(
            &[("authorization", "stale")],
            Some(Authentication::Bearer {
                token: "T".to_string(),
            }),
        );
        let built = build_headers(&cfg, None);
        assert_eq!(built, map(&[("Authorization", "Bearer T")]));
    }

    #[test]
    fn basic_auth_is_base64_of_user_colon_password() {
        let cfg = config(
            &[],
            Some(Authentication::Basic {
                username: "u".to_string(),
                password: "p".to_string(),
            }),
        );
        let built = build_headers(&cfg, None);
        assert_eq!(
            built.get("Authorization").map(String::as_str),
            Some("Basic dTpw")
        );
    }

    #[test]
    fn api_key_uses_configured_header_name() {
        let cfg = config(
            &[("Content-Type", "application/json")],
            Some(Authentication::ApiKey {
                api_key: "secret".to_string(),
                header_name: "X-Api-Key".to_string(),
            }),
        );
        let built = build_headers(&cfg, None);
        assert_eq!(built.get("X-Api-Key").map(String::as_str), Some("secret"));
        assert_eq!(
            built.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
    }

    #[test]
    fn incomplete_credentials_add_nothing() {
        let cases = [
            Authentication::Bearer {
                token: String::new(),
            },
            Authentication::ApiKey {
                api_key: "k".to_string(),
                header_name: String::new(),
            },
            Authentication::Basic {
                username: "u".to_string(),
                password: String::new(),
            },
        ];
        for auth in cases {
            assert_eq!(auth_header(&auth), None, "{:?}", auth);
        }
    }

    #[test]
    fn illegal_header_names_are_rejected() {
        let err = to_header_map(&map(&[("bad header", "x")])).expect_err("invalid");
        assert_eq!(err.code, "INVALID_PARAMS");
        let ok = to_header_map(&map(&[("X-Ok", "1")])).expect("valid");
        assert_eq!(ok.get("x-ok").and_then(|v| v.to_str().ok()), Some("1"));
    }
}
