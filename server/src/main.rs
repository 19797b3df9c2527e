use std::process::ExitCode;

use shopping_server::{start_server, Config, StartupError};
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));
    fmt().with_env_filter(filter).init();

    let result = match Config::load() {
        Ok(config) => start_server(config).await,
        Err(e) => Err(StartupError::from(e)),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Failed to start server: {e}");
            ExitCode::FAILURE
        }
    }
}
