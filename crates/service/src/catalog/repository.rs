use async_trait::async_trait;

use super::domain::Item;
use crate::errors::ServiceError;

/// Storage Gateway for items. Every call is one round trip to the backing
/// store; a missing item is never an error.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// All items, in no particular order.
    async fn find_all(&self) -> Result<Vec<Item>, ServiceError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Item>, ServiceError>;
    /// Insert or fully overwrite the record keyed by `item.id`.
    async fn save(&self, item: Item) -> Result<Item, ServiceError>;
    async fn exists_by_id(&self, id: &str) -> Result<bool, ServiceError>;
}

/// In-memory repository for tests and the `memory` backend
pub mod memory {
    use super::*;
    use std::collections::HashMap;
    use tokio::sync::RwLock;

    #[derive(Default)]
    pub struct InMemoryItemRepository {
        items: RwLock<HashMap<String, Item>>, // key: item id
    }

    impl InMemoryItemRepository {
        pub fn new() -> Self { Self::default() }

        pub async fn len(&self) -> usize { self.items.read().await.len() }

        pub async fn is_empty(&self) -> bool { self.items.read().await.is_empty() }
    }

    #[async_trait]
    impl ItemRepository for InMemoryItemRepository {
        async fn find_all(&self) -> Result<Vec<Item>, ServiceError> {
            let items = self.items.read().await;
            Ok(items.values().cloned().collect())
        }

        async fn find_by_id(&self, id: &str) -> Result<Option<Item>, ServiceError> {
            let items = self.items.read().await;
            Ok(items.get(id).cloned())
        }

        async fn save(&self, item: Item) -> Result<Item, ServiceError> {
            let mut items = self.items.write().await;
            items.insert(item.id.clone(), item.clone());
            Ok(item)
        }

        async fn exists_by_id(&self, id: &str) -> Result<bool, ServiceError> {
            let items = self.items.read().await;
            Ok(items.contains_key(id))
        }
    }

}
