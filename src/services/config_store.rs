use crate::constants::http::{CONTENT_TYPE, DEFAULT_CONTENT_TYPE};
use crate::constants::storage::CONFIG_FILE_MODE;
use crate::errors::ToolError;
use crate::services::logger::Logger;
use crate::utils::fs_atomic::atomic_write_text_file;
use crate::utils::headers::overlay_headers;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Authentication {
    Bearer {
        #[serde(default)]
        token: String,
    },
    ApiKey {
        #[serde(default, rename = "apiKey")]
        api_key: String,
        #[serde(default, rename = "headerName")]
        header_name: String,
    },
    Basic {
        #[serde(default)]
        username: String,
        #[serde(default)]
        password: String,
    },
}

impl Authentication {
    pub fn kind(&self) -> &'static str {
        match self {
            Authentication::Bearer { .. } => "bearer",
            Authentication::ApiKey { .. } => "api_key",
            Authentication::Basic { .. } => "basic",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfig {
    pub name: String,
    pub base_url: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication: Option<Authentication>,
}

/// What `list` exposes per config. Never carries credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSummary {
    pub name: String,
    pub base_url: String,
    pub has_auth: bool,
    pub auth_type: Option<&'static str>,
    pub config_file_path: String,
}

/// Named API configs mirrored to one JSON file. Loaded once at startup,
/// rewritten in full after every mutation.
pub struct ConfigStore {
    logger: Logger,
    file_path: PathBuf,
    configs: RwLock<BTreeMap<String, ApiConfig>>,
}

impl ConfigStore {
    pub fn new(logger: &Logger, file_path: PathBuf) -> Self {
        Self {
            logger: logger.child("store"),
            file_path,
            configs: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Replaces the in-memory map with the file contents. A missing file is
    /// an empty store; an unreadable or corrupt one is logged and also
    /// treated as empty so the server still starts.
    pub fn load(&self) {
        let loaded = match self.read_file() {
            Ok(configs) => configs,
            Err(err) => {
                self.logger.error(
                    "Error loading configs",
                    Some(&serde_json::json!({
                        "path": self.file_path.display().to_string(),
                        "error": err.message,
                    })),
                );
                BTreeMap::new()
            }
        };
        self.logger.debug(
            "Configs loaded",
            Some(&serde_json::json!({"count": loaded.len()})),
        );
        *self.configs.write().unwrap_or_else(|err| err.into_inner()) = loaded;
    }

    fn read_file(&self) -> Result<BTreeMap<String, ApiConfig>, ToolError> {
        if !self.file_path.exists() {
            return Ok(BTreeMap::new());
        }
        let raw = std::fs::read_to_string(&self.file_path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn save(&self) -> Result<(), ToolError> {
        let data = {
            let guard = self.configs.read().unwrap_or_else(|err| err.into_inner());
            serde_json::to_string_pretty(&*guard).map_err(ToolError::persistence_failed)?
        };
        atomic_write_text_file(&self.file_path, &data, CONFIG_FILE_MODE).map_err(|err| {
            self.logger.error(
                "Failed to save configs",
                Some(&serde_json::json!({
                    "path": self.file_path.display().to_string(),
                    "error": err.to_string(),
                })),
            );
            ToolError::persistence_failed(err)
        })
    }

    /// Inserts or fully replaces `name`. The map is updated before the file
    /// is written, so a failed save leaves memory ahead of disk until the
    /// next successful save.
    pub fn set(
        &self,
        name: &str,
        base_url: &str,
        headers: Option<BTreeMap<String, String>>,
        authentication: Option<Authentication>,
    ) -> Result<ApiConfig, ToolError> {
        if name.trim().is_empty() {
            return Err(ToolError::invalid_params("name must be a non-empty string"));
        }
        if base_url.trim().is_empty() {
            return Err(ToolError::invalid_params("baseUrl must be a non-empty string"));
        }
        let mut merged = BTreeMap::from([(
            CONTENT_TYPE.to_string(),
            DEFAULT_CONTENT_TYPE.to_string(),
        )]);
        if let Some(headers) = headers {
            overlay_headers(&mut merged, &headers);
        }
        let config = ApiConfig {
            name: name.to_string(),
            base_url: base_url.to_string(),
            headers: merged,
            authentication,
        };
        self.configs
            .write()
            .unwrap_or_else(|err| err.into_inner())
            .insert(name.to_string(), config.clone());
        self.save()?;
        self.logger.info(
            "Config set",
            Some(&serde_json::json!({
                "name": name,
                "auth_type": config.authentication.as_ref().map(Authentication::kind),
            })),
        );
        Ok(config)
    }

    pub fn get(&self, name: &str) -> Result<ApiConfig, ToolError> {
        self.configs
            .read()
            .unwrap_or_else(|err| err.into_inner())
            .get(name)
            .cloned()
            .ok_or_else(|| ToolError::config_not_found(name))
    }

    pub fn list(&self) -> Vec<ConfigSummary> {
        let config_file_path = self.file_path.display().to_string();
        self.configs
            .read()
            .unwrap_or_else(|err| err.into_inner())
            .iter()
            .map(|(name, config)| ConfigSummary {
                name: name.clone(),
                base_url: config.base_url.clone(),
                has_auth: config.authentication.is_some(),
                auth_type: config.authentication.as_ref().map(Authentication::kind),
                config_file_path: config_file_path.clone(),
            })
            .collect()
    }

    pub fn delete(&self, name: &str) -> Result<(), ToolError> {
        let removed = self
            .configs
            .write()
            .unwrap_or_else(|err| err.into_inner())
            .remove(name);
        if removed.is_none() {
            return Err(ToolError::config_not_found(name));
        }
        self.save()?;
        self.logger
            .info("Config deleted", Some(&serde_json::json!({"name": name})));
        Ok(())
    }
}
