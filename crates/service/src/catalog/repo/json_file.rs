use std::path::PathBuf;

use async_trait::async_trait;

use crate::catalog::domain::Item;
use crate::catalog::repository::ItemRepository;
use crate::errors::ServiceError;
use crate::storage::json_map_store::JsonMapStore;

/// Items persisted as a JSON object keyed by id.
pub struct JsonFileItemRepository {
    store: JsonMapStore<String, Item>,
}

impl JsonFileItemRepository {
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Self, ServiceError> {
        Ok(Self { store: JsonMapStore::open(path).await? })
    }
}

#[async_trait]
impl ItemRepository for JsonFileItemRepository {
    async fn find_all(&self) -> Result<Vec<Item>, ServiceError> {
        Ok(self.store.values().await)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Item>, ServiceError> {
        Ok(self.store.get(&id.to_string()).await)
    }

    async fn save(&self, item: Item) -> Result<Item, ServiceError> {
        self.store.insert(item.id.clone(), item.clone()).await?;
        Ok(item)
    }

    async fn exists_by_id(&self, id: &str) -> Result<bool, ServiceError> {
        Ok(self.store.contains_key(&id.to_string()).await)
    }
}
