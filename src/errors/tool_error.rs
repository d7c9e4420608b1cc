use serde::Serialize;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolErrorKind {
    InvalidParams,
    Internal,
    /// Failures nobody anticipated (io, serialization). Reported with the
    /// tool name attached.
    Unhandled,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolError {
    pub kind: ToolErrorKind,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ToolError {
    pub fn new(kind: ToolErrorKind, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            code: code.into(),
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::InvalidParams, "INVALID_PARAMS", message)
    }

    pub fn config_not_found(name: &str) -> Self {
        Self::new(
            ToolErrorKind::InvalidParams,
            "CONFIG_NOT_FOUND",
            format!("API configuration '{}' not found", name),
        )
        .with_hint("Use list_api_configs to see configured APIs.")
    }

    pub fn file_read_failed(path: &str, cause: impl fmt::Display) -> Self {
        Self::new(
            ToolErrorKind::InvalidParams,
            "FILE_READ_FAILED",
            format!("Failed to read file '{}': {}", path, cause),
        )
    }

    pub fn persistence_failed(cause: impl fmt::Display) -> Self {
        Self::new(
            ToolErrorKind::Internal,
            "PERSISTENCE_FAILED",
            format!("Failed to save config: {}", cause),
        )
    }

    pub fn transport_failed(cause: impl fmt::Display) -> Self {
        Self::new(
            ToolErrorKind::Internal,
            "TRANSPORT_FAILED",
            format!("API request failed: {}", cause),
        )
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Internal, "INTERNAL", message)
    }

    pub fn unhandled(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Unhandled, "UNHANDLED", message)
    }
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for ToolError {}

impl From<std::io::Error> for ToolError {
    fn from(err: std::io::Error) -> Self {
        ToolError::unhandled(err.to_string())
    }
}

impl From<serde_json::Error> for ToolError {
    fn from(err: serde_json::Error) -> Self {
        ToolError::unhandled(err.to_string())
    }
}
