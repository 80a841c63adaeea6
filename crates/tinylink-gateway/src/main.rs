use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tinylink_gateway::app::App;
use tinylink_gateway::cli::{StorageBackendArg, CLI};
use tinylink_gateway::state::AppState;
use tinylink_shortener::{DnsValidator, ShortenerService};
use tinylink_storage::{JsonFileRepository, MemoryRepository};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = CLI::try_parse()?;
    let validator = DnsValidator::with_timeout(Duration::from_secs(config.dns_timeout_secs));

    info!(
        listen_addr = %config.listen_addr,
        storage_backend = %config.storage,
        "starting tinylink gateway"
    );

    let state = match config.storage {
        StorageBackendArg::InMemory => {
            let service = ShortenerService::new(MemoryRepository::new(), validator);
            AppState::new(Arc::new(service))
        }
        StorageBackendArg::JsonFile => {
            let repository = JsonFileRepository::open(&config.data_file).await;
            let service = ShortenerService::new(repository, validator);
            AppState::new(Arc::new(service))
        }
    };

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "listening");
    axum::serve(listener, App::router(state)).await?;

    Ok(())
}
