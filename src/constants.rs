pub mod server {
    pub const NAME: &str = "api-caller";
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const PROTOCOL_VERSION: &str = "2025-06-18";
}

pub mod storage {
    pub const CONFIG_FILE_NAME: &str = "api-configs.json";
    pub const CONFIG_FILE_MODE: u32 = 0o600;
}

pub mod http {
    pub const CONTENT_TYPE: &str = "Content-Type";
    pub const AUTHORIZATION: &str = "Authorization";
    pub const DEFAULT_CONTENT_TYPE: &str = "application/json";
    pub const USER_AGENT: &str = concat!("api-caller/", env!("CARGO_PKG_VERSION"));
}
