use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::catalog::domain::{Item, ItemChanges, NewItem};
use crate::catalog::repository::ItemRepository;
use crate::errors::ServiceError;

/// Application service encapsulating the catalog's business rules.
/// Validation and existence checks happen here; the repository only stores.
pub struct MenuService<R: ItemRepository + ?Sized> {
    repo: Arc<R>,
}

/// Service over a runtime-selected backend.
pub type DynMenuService = MenuService<dyn ItemRepository>;

fn validate_fields(name: &str, price: f64) -> Result<(), ServiceError> {
    models::item::validate_name(name)?;
    models::item::validate_price(price)?;
    Ok(())
}

impl<R: ItemRepository + ?Sized> MenuService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self))]
    pub async fn list_items(&self) -> Result<Vec<Item>, ServiceError> {
        self.repo.find_all().await
    }

    #[instrument(skip(self))]
    pub async fn get_item(&self, id: &str) -> Result<Item, ServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("item", id))
    }

    /// Validate, assign an id when absent, reject duplicates, then persist.
    #[instrument(skip(self, input), fields(id = ?input.id))]
    pub async fn create_item(&self, input: NewItem) -> Result<Item, ServiceError> {
        validate_fields(&input.name, input.price)?;
        let id = match input.id {
            Some(id) => {
                models::item::validate_id(&id)?;
                id
            }
            None => Uuid::new_v4().to_string(),
        };
        if self.repo.exists_by_id(&id).await? {
            return Err(ServiceError::conflict("item", &id));
        }
        let saved = self
            .repo
            .save(Item { id, name: input.name, description: input.description, price: models::item::normalize_price(input.price) })
            .await?;
        info!(id = %saved.id, "item_created");
        Ok(saved)
    }

    /// Existence is checked before validation, so an unknown id is always
    /// reported as not found.
    #[instrument(skip(self, changes))]
    pub async fn update_item(&self, id: &str, mut changes: ItemChanges) -> Result<Item, ServiceError> {
        if !self.repo.exists_by_id(id).await? {
            return Err(ServiceError::not_found("item", id));
        }
        validate_fields(&changes.name, changes.price)?;
        changes.price = models::item::normalize_price(changes.price);
        let saved = self.repo.save(changes.into_item(id.to_string())).await?;
        info!(id = %saved.id, "item_updated");
        Ok(saved)
    }
}
