use crate::errors::ToolError;
use crate::services::config_store::ConfigStore;
use crate::services::tool_executor::ToolHandler;
use crate::services::validation::Validation;
use serde_json::Value;
use std::sync::Arc;

pub const CONFIG_TOOLS: &[&str] = &["set_api_config", "list_api_configs", "delete_api_config"];

#[derive(Clone)]
pub struct ConfigManager {
    validation: Validation,
    store: Arc<ConfigStore>,
}

impl ConfigManager {
    pub fn new(validation: Validation, store: Arc<ConfigStore>) -> Self {
        Self { validation, store }
    }

    pub fn handle_tool(&self, tool: &str, args: &Value) -> Result<String, ToolError> {
        match tool {
            "set_api_config" => self.set_config(args),
            "list_api_configs" => self.list_configs(),
            "delete_api_config" => self.delete_config(args),
            other => Err(ToolError::unhandled(format!(
                "ConfigManager cannot serve tool {}",
                other
            ))),
        }
    }

    fn set_config(&self, args: &Value) -> Result<String, ToolError> {
        let name = self.validation.ensure_string(args.get("name"), "name")?;
        let base_url = self.validation.ensure_string(args.get("baseUrl"), "baseUrl")?;
        let headers = self.validation.ensure_string_map(args.get("headers"), "headers")?;
        let authentication = self
            .validation
            .ensure_authentication(args.get("authentication"))?;
        self.store.set(&name, &base_url, headers, authentication)?;
        Ok(format!(
            "API configuration '{}' has been set successfully!\nConfig saved to: {}",
            name,
            self.store.file_path().display()
        ))
    }

    fn list_configs(&self) -> Result<String, ToolError> {
        let listing = serde_json::to_string_pretty(&self.store.list())?;
        Ok(format!("Configured APIs:\n{}", listing))
    }

    fn delete_config(&self, args: &Value) -> Result<String, ToolError> {
        let name = self.validation.ensure_string(args.get("name"), "name")?;
        self.store.delete(&name)?;
        Ok(format!(
            "API configuration '{}' has been deleted successfully!\nConfig saved to: {}",
            name,
            self.store.file_path().display()
        ))
    }
}

#[async_trait::async_trait]
impl ToolHandler for ConfigManager {
    async fn handle(&self, tool: &str, args: Value) -> Result<String, ToolError> {
        self.handle_tool(tool, &args)
    }
}
