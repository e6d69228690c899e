use std::sync::Arc;

use roadmap_scout::{ai, api, config, db, logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = config::AppConfig::from_env()?;

    if let Err(e) = logging::init_logging(config.data_dir.clone()) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    tracing::info!("Roadmap Scout backend starting up...");
    tracing::info!("Data directory: {:?}", config.data_dir);

    let database = Arc::new(db::Database::open(config.db_path.clone())?);
    let ai_client = Arc::new(ai::CompletionClient::new(&config.ai)?);

    let state = api::AppState::new(database, ai_client);
    let handle = api::start_server(state, config.addr())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to start API server: {}", e))?;

    tracing::info!("Roadmap Scout initialized successfully");

    tokio::signal::ctrl_c().await?;
    handle.shutdown();

    Ok(())
}
