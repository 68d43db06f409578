//! Runtime wiring helpers
//!
//! Opens the Storage Gateway selected in `[storage]` so binaries and tests
//! do not need to know about individual backends.

use std::sync::Arc;

use configs::{AppConfig, StorageBackend};
use tracing::info;

use crate::catalog::repo::{JsonFileItemRepository, SeaOrmItemRepository};
use crate::catalog::repository::{memory::InMemoryItemRepository, ItemRepository};

/// Build the configured item repository. The postgres backend connects
/// and applies migrations before returning.
pub async fn open_item_repository(cfg: &AppConfig) -> anyhow::Result<Arc<dyn ItemRepository>> {
    let repo: Arc<dyn ItemRepository> = match cfg.storage.backend {
        StorageBackend::Memory => Arc::new(InMemoryItemRepository::new()),
        StorageBackend::File => {
            common::env::ensure_data_dir(&cfg.storage.data_file).await?;
            Arc::new(JsonFileItemRepository::open(&cfg.storage.data_file).await?)
        }
        StorageBackend::Postgres => {
            let db = models::db::connect_with_config(&cfg.database).await?;
            models::db::migrate(&db).await?;
            Arc::new(SeaOrmItemRepository::new(db))
        }
    };
    info!(backend = ?cfg.storage.backend, "item repository ready");
    Ok(repo)
}
