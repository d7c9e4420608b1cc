use crate::errors::ToolError;
use crate::managers::api::{ApiManager, API_TOOLS};
use crate::managers::config::{ConfigManager, CONFIG_TOOLS};
use crate::mcp::catalog::tool_catalog;
use crate::services::config_store::ConfigStore;
use crate::services::logger::Logger;
use crate::services::tool_executor::{ToolExecutor, ToolHandler};
use crate::services::validation::Validation;
use crate::utils::paths::resolve_config_path;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

pub struct App {
    pub logger: Logger,
    pub store: Arc<ConfigStore>,
    pub tool_executor: Arc<ToolExecutor>,
}

impl App {
    fn validate_tool_wiring(executor: &ToolExecutor) -> Result<(), ToolError> {
        let mut missing: Vec<String> = tool_catalog()
            .iter()
            .filter(|tool| !executor.has_handler(&tool.name))
            .map(|tool| tool.name.clone())
            .collect();
        if missing.is_empty() {
            return Ok(());
        }
        missing.sort();
        Err(ToolError::internal(format!(
            "Tool wiring is incomplete, no handler for: {}",
            missing.join(", ")
        )))
    }

    pub fn initialize() -> Result<Self, ToolError> {
        Self::initialize_with(Logger::new("api-caller"), None)
    }

    /// Builds the store (loading it once) and wires every catalog tool to
    /// its handler.
    pub fn initialize_with(logger: Logger, config_path: Option<&Path>) -> Result<Self, ToolError> {
        let validation = Validation::new();

        let store = Arc::new(ConfigStore::new(&logger, resolve_config_path(config_path)));
        store.load();

        let config_manager = Arc::new(ConfigManager::new(validation.clone(), store.clone()));
        let api_manager = Arc::new(ApiManager::new(&logger, validation, store.clone())?);

        let mut handlers: HashMap<String, Arc<dyn ToolHandler>> = HashMap::new();
        for tool in CONFIG_TOOLS {
            handlers.insert(tool.to_string(), config_manager.clone());
        }
        for tool in API_TOOLS {
            handlers.insert(tool.to_string(), api_manager.clone());
        }

        let tool_executor = Arc::new(ToolExecutor::new(&logger, handlers));
        Self::validate_tool_wiring(&tool_executor)?;

        logger.info(
            "Initialized",
            Some(&serde_json::json!({
                "config_path": store.file_path().display().to_string(),
                "tools": tool_executor.tool_names().len(),
            })),
        );

        Ok(Self {
            logger,
            store,
            tool_executor,
        })
    }
}
