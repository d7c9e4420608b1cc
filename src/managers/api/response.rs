use crate::errors::ToolError;
use reqwest::header::HeaderMap;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseData {
    Json(Value),
    Text(String),
}

impl ResponseData {
    /// JSON when the body parses, the raw text otherwise.
    pub fn decode(body: String) -> Self {
        match serde_json::from_str::<Value>(&body) {
            Ok(parsed) => ResponseData::Json(parsed),
            Err(_) => ResponseData::Text(body),
        }
    }

    fn render(&self) -> Result<String, ToolError> {
        match self {
            ResponseData::Json(value) => Ok(serde_json::to_string_pretty(value)?),
            ResponseData::Text(text) => Ok(text.clone()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub method: String,
    pub url: String,
    pub status: u16,
    pub status_text: String,
    pub headers: BTreeMap<String, String>,
    pub data: ResponseData,
}

impl ApiResponse {
    pub fn render(&self) -> Result<String, ToolError> {
        let status_line = format!("Status: {} {}", self.status, self.status_text);
        Ok(format!(
            "{} {}\n{}\n\nResponse:\n{}",
            self.method,
            self.url,
            status_line.trim_end(),
            self.data.render()?
        ))
    }
}

/// Lower-cased names, one value per name; repeated headers keep the last.
pub fn flatten_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    for (name, value) in headers {
        let text = String::from_utf8_lossy(value.as_bytes()).to_string();
        out.insert(name.as_str().to_lowercase(), text);
    }
    out
}
