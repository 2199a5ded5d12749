use anyhow::Result;
use atelier::config::{AppConfig, StorageConfig};
use atelier::core::auth::StaticTokenProvider;
use atelier::core::store::RecordStore;
use atelier::server::ServerBuilder;
use atelier::storage::InMemoryStore;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("atelier=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::load()?;
    let addr = config.server.socket_addr()?;
    let store = open_store(&config.storage).await?;

    if config.auth.admin_tokens.is_empty() {
        tracing::warn!("no admin tokens configured; write routes are unreachable");
    }

    tracing::info!(backend = store.backend(), "record store ready");

    ServerBuilder::new()
        .with_shared_store(store)
        .with_auth(StaticTokenProvider::new(config.auth.admin_tokens))
        .with_cors(config.cors)
        .serve(addr)
        .await
}

async fn open_store(config: &StorageConfig) -> Result<Arc<dyn RecordStore>> {
    match config {
        StorageConfig::Memory => Ok(Arc::new(InMemoryStore::new())),
        #[cfg(feature = "mongodb_backend")]
        StorageConfig::Mongodb { uri, database } => {
            use atelier::entities::{Artwork, Award, Category, HeroSlide, Message, Photography};
            use atelier::storage::MongoStore;

            let store = MongoStore::connect(uri, database).await?;
            store.ensure_indexes::<Artwork>().await?;
            store.ensure_indexes::<Category>().await?;
            store.ensure_indexes::<HeroSlide>().await?;
            store.ensure_indexes::<Award>().await?;
            store.ensure_indexes::<Photography>().await?;
            store.ensure_indexes::<Message>().await?;
            Ok(Arc::new(store))
        }
        #[cfg(not(feature = "mongodb_backend"))]
        StorageConfig::Mongodb { .. } => {
            anyhow::bail!("storage backend 'mongodb' requires the mongodb_backend feature")
        }
    }
}
