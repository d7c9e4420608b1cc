use crate::constants::storage::CONFIG_FILE_NAME;
use std::env;
use std::path::{Path, PathBuf};

fn normalize_env_path(value: Option<String>) -> Option<PathBuf> {
    let raw = value?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lowered = trimmed.to_lowercase();
    if lowered == "undefined" || lowered == "null" {
        return None;
    }
    Some(PathBuf::from(trimmed))
}

fn working_dir() -> PathBuf {
    env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

fn absolutize(path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        working_dir().join(path)
    }
}

/// Resolution order: explicit override, `API_CALLER_CONFIG_PATH`, then
/// `api-configs.json` in the working directory. Relative paths are joined
/// onto the working directory.
pub fn resolve_config_path(override_path: Option<&Path>) -> PathBuf {
    if let Some(path) = override_path {
        return absolutize(path.to_path_buf());
    }
    if let Some(path) = normalize_env_path(env::var("API_CALLER_CONFIG_PATH").ok()) {
        return absolutize(path);
    }
    working_dir().join(CONFIG_FILE_NAME)
}
