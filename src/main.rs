use api_caller::app::App;
use api_caller::services::logger::{LogLevel, Logger};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "api-caller", version, about = "MCP server for calling configured HTTP APIs")]
struct Cli {
    /// JSON file holding the named API configs.
    #[arg(long, env = "API_CALLER_CONFIG_PATH")]
    config_path: Option<PathBuf>,

    /// error, warn, info or debug.
    #[arg(long, env = "LOG_LEVEL")]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let mut logger = Logger::new("api-caller");
    if let Some(level) = cli.log_level.as_deref().and_then(LogLevel::parse) {
        logger.set_level(level);
    }

    let result = match App::initialize_with(logger, cli.config_path.as_deref()) {
        Ok(app) => api_caller::mcp::server::run_stdio(app).await,
        Err(err) => Err(err),
    };
    if let Err(err) = result {
        eprintln!("api-caller: {}", err);
        std::process::exit(1);
    }
}
