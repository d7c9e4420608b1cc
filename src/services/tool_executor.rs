use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use crate::errors::{McpError, ToolError};
use crate::mcp::catalog::validate_tool_args;
use crate::services::logger::Logger;
use crate::utils::tool_errors::unknown_tool_error;

/// One handler may serve several tools; `tool` says which one was invoked.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn handle(&self, tool: &str, args: Value) -> Result<String, ToolError>;
}

#[derive(Clone)]
pub struct ToolExecutor {
    logger: Logger,
    handlers: Arc<HashMap<String, Arc<dyn ToolHandler>>>,
}

impl ToolExecutor {
    pub fn new(logger: &Logger, handlers: HashMap<String, Arc<dyn ToolHandler>>) -> Self {
        Self {
            logger: logger.child("executor"),
            handlers: Arc::new(handlers),
        }
    }

    pub fn has_handler(&self, tool: &str) -> bool {
        self.handlers.contains_key(tool)
    }

    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.handlers.keys().cloned().collect();
        names.sort();
        names
    }

    pub async fn execute(&self, tool: &str, args: Value) -> Result<String, McpError> {
        let Some(handler) = self.handlers.get(tool).cloned() else {
            self.logger
                .warn("Unknown tool", Some(&serde_json::json!({"tool": tool})));
            return Err(unknown_tool_error(tool, &self.tool_names()));
        };
        let args = if args.is_null() {
            Value::Object(Default::default())
        } else {
            args
        };
        validate_tool_args(tool, &args)?;

        let call_id = uuid::Uuid::new_v4().to_string();
        let started = Instant::now();
        self.logger.debug(
            "Tool call started",
            Some(&serde_json::json!({"tool": tool, "call_id": call_id})),
        );
        let outcome = handler.handle(tool, args).await;
        let duration_ms = started.elapsed().as_millis() as u64;
        match outcome {
            Ok(text) => {
                self.logger.info(
                    "Tool call finished",
                    Some(&serde_json::json!({
                        "tool": tool,
                        "call_id": call_id,
                        "duration_ms": duration_ms,
                    })),
                );
                Ok(text)
            }
            Err(err) => {
                self.logger.warn(
                    "Tool call failed",
                    Some(&serde_json::json!({
                        "tool": tool,
                        "call_id": call_id,
                        "duration_ms": duration_ms,
                        "kind": err.kind,
                        "code": err.code,
                        "message": err.message,
                    })),
                );
                Err(McpError::from_tool_error(tool, &err))
            }
        }
    }
}
