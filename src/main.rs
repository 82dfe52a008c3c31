use clap::Parser;
use diet_data_api::utils::{logger, validation::Validate};
use diet_data_api::{AppState, BlobClientResolver, ServerConfig, StorageConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();

    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_server_logger(config.verbose);
    }

    tracing::info!("Starting diet-data-api server");
    if config.verbose {
        tracing::debug!("Server config: {:?}", config);
    }

    // Storage problems must not prevent startup; the fetch route reports
    // them per request and resolution is retried once they are fixed.
    let storage_config = StorageConfig::from_env();
    if let Err(e) = storage_config.validate() {
        tracing::warn!("Storage configuration incomplete: {}", e);
        tracing::warn!("FetchDataset will return 500 until storage is configured");
    }

    let state = AppState::new(BlobClientResolver::new(storage_config));
    let app = diet_data_api::router(state);

    let addr = format!("{}:{}", config.bind, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
