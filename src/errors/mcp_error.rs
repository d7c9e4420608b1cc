use crate::errors::{ToolError, ToolErrorKind};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(i32)]
pub enum ErrorCode {
    ParseError = -32700,
    InvalidRequest = -32600,
    MethodNotFound = -32601,
    InvalidParams = -32602,
    InternalError = -32603,
}

impl ErrorCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct McpError {
    pub code: ErrorCode,
    pub message: String,
}

impl McpError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Converts a handler failure into its wire form. Only unhandled
    /// failures get the tool name prefixed; recognized ones pass through.
    pub fn from_tool_error(tool: &str, error: &ToolError) -> Self {
        let mut message = match error.kind {
            ToolErrorKind::Unhandled => format!("Error executing {}: {}", tool, error.message),
            _ => error.message.clone(),
        };
        if let Some(hint) = &error.hint {
            message.push_str(&format!("\nHint: {}", hint));
        }
        match error.kind {
            ToolErrorKind::InvalidParams => McpError::new(ErrorCode::InvalidParams, message),
            ToolErrorKind::Internal | ToolErrorKind::Unhandled => {
                McpError::new(ErrorCode::InternalError, message)
            }
        }
    }
}

impl fmt::Display for McpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for McpError {}
