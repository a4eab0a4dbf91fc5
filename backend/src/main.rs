use std::sync::Arc;
use clap::Parser;
use tracing::{error, info};
use voter_api::{
    cache::RedisStore,
    config::{Config, StoreKind},
    routes::AppState,
    server,
    store::{MemoryStore, StoreError, VoterStore},
};

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

async fn open_store(config: &Config) -> Result<Arc<dyn VoterStore>, StoreError> {
    match config.store {
        StoreKind::Memory => {
            info!("Using in-memory voter store");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreKind::Redis => {
            info!("Using redis voter store at {}", config.redis_url);
            let store = RedisStore::connect(&config.redis_url).await.map_err(|e| {
                error!("Error connecting to redis: {}", e);
                e
            })?;
            Ok(Arc::new(store))
        }
    }
}

#[rocket::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let config = Config::parse();

    let store = open_store(&config).await?;

    info!("🚀 Starting voter API on {}:{}", config.host, config.port);
    server::build(config.figment(), AppState::new(store))
        .launch()
        .await?;

    Ok(())
}
