use crate::errors::ToolError;
use crate::services::config_store::Authentication;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Clone, Default)]
pub struct Validation;

impl Validation {
    pub fn new() -> Self {
        Self
    }

    pub fn ensure_string(&self, value: Option<&Value>, label: &str) -> Result<String, ToolError> {
        let text = value.and_then(Value::as_str).ok_or_else(|| {
            ToolError::invalid_params(format!("{} must be a non-empty string", label))
        })?;
        if text.trim().is_empty() {
            return Err(ToolError::invalid_params(format!(
                "{} must be a non-empty string",
                label
            )));
        }
        Ok(text.to_string())
    }

    /// Like `ensure_string` but allows "" (an empty endpoint targets the
    /// base URL itself).
    pub fn ensure_string_allow_empty(
        &self,
        value: Option<&Value>,
        label: &str,
    ) -> Result<String, ToolError> {
        value
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| ToolError::invalid_params(format!("{} must be a string", label)))
    }

    /// Flat string map. Scalars are stringified, nulls dropped, nested
    /// values rejected.
    pub fn ensure_string_map(
        &self,
        value: Option<&Value>,
        label: &str,
    ) -> Result<Option<BTreeMap<String, String>>, ToolError> {
        let Some(value) = value.filter(|v| !v.is_null()) else {
            return Ok(None);
        };
        let obj = value
            .as_object()
            .ok_or_else(|| ToolError::invalid_params(format!("{} must be an object", label)))?;
        let mut out = BTreeMap::new();
        for (key, raw) in obj {
            let rendered = match raw {
                Value::Null => continue,
                Value::String(text) => text.clone(),
                Value::Bool(_) | Value::Number(_) => raw.to_string(),
                Value::Array(_) | Value::Object(_) => {
                    return Err(ToolError::invalid_params(format!(
                        "{}.{} must be a string",
                        label, key
                    )))
                }
            };
            out.insert(key.clone(), rendered);
        }
        Ok(Some(out))
    }

    pub fn ensure_authentication(
        &self,
        value: Option<&Value>,
    ) -> Result<Option<Authentication>, ToolError> {
        let Some(value) = value.filter(|v| !v.is_null()) else {
            return Ok(None);
        };
        self.ensure_typed(value, "authentication")
            .map(Some)
            .map_err(|err| err.with_hint("authentication.type must be one of bearer, api_key, basic"))
    }

    pub fn ensure_typed<T: DeserializeOwned>(&self, value: &Value, label: &str) -> Result<T, ToolError> {
        serde_json::from_value(value.clone())
            .map_err(|err| ToolError::invalid_params(format!("Invalid {}: {}", label, err)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_map_stringifies_scalars_and_drops_nulls() {
        let validation = Validation::new();
        let map = validation
            .ensure_string_map(
                Some(&json!({"page": 2, "draft": false, "q": "a b", "skip": null})),
                "queryParams",
            )
            .expect("valid")
            .expect("present");
        assert_eq!(map.get("page").map(String::as_str), Some("2"));
        assert_eq!(map.get("draft").map(String::as_str), Some("false"));
        assert_eq!(map.get("q").map(String::as_str), Some("a b"));
        assert!(!map.contains_key("skip"));
    }

    #[test]
    fn string_map_rejects_nested_values() {
        let err = Validation::new()
            .ensure_string_map(Some(&json!({"x": {"y": 1}})), "headers")
            .expect_err("nested");
        assert_eq!(err.message, "headers.x must be a string");
    }

    #[test]
    fn authentication_requires_known_type() {
        let validation = Validation::new();
        let auth = validation
            .ensure_authentication(Some(&json!({"type": "bearer", "token": "T", "apiKey": "ignored"})))
            .expect("valid");
        assert_eq!(
            auth,
            Some(Authentication::Bearer {
                token: "T".to_string()
            })
        );
        assert!(validation
            .ensure_authentication(Some(&json!({"type": "oauth"})))
            .is_err());
        assert!(validation
            .ensure_authentication(Some(&json!({"token": "T"})))
            .is_err());
        assert_eq!(validation.ensure_authentication(None).expect("none"), None);
    }

    #[test]
    fn blank_strings_are_rejected() {
        let validation = Validation::new();
        assert!(validation.ensure_string(Some(&json!("  ")), "name").is_err());
        assert_eq!(
            validation
                .ensure_string_allow_empty(Some(&json!("")), "endpoint")
                .expect("empty ok"),
            ""
        );
    }
}
