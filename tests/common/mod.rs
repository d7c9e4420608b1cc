#![allow(dead_code)]

pub mod mock_backend;

use api_caller::app::App;
use api_caller::services::logger::Logger;
use std::path::{Path, PathBuf};

pub fn tmp_config_path(prefix: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("{}-{}", prefix, uuid::Uuid::new_v4()))
        .join("api-configs.json")
}

pub fn app_at(path: &Path) -> App {
    App::initialize_with(Logger::new("test"), Some(path)).expect("app")
}

pub fn cleanup(path: &Path) {
    if let Some(dir) = path.parent() {
        let _ = std::fs::remove_dir_all(dir);
    }
}
