use crate::errors::{ErrorCode, McpError};
use crate::utils::suggest::suggest;

pub fn unknown_tool_error(tool: &str, known_tools: &[String]) -> McpError {
    let suggestions = suggest(tool, known_tools, 3);
    let mut message = format!("Unknown tool: {}", tool);
    if !suggestions.is_empty() {
        message.push_str(&format!("\nDid you mean: {}?", suggestions.join(", ")));
    }
    McpError::new(ErrorCode::MethodNotFound, message)
}
