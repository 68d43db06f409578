use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::catalog::domain::Item;
use crate::catalog::repository::ItemRepository;
use crate::errors::ServiceError;

/// SeaORM-backed repository implementation.
pub struct SeaOrmItemRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmItemRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn db_err(e: models::errors::ModelError) -> ServiceError {
    ServiceError::Db(e.to_string())
}

#[async_trait]
impl ItemRepository for SeaOrmItemRepository {
    async fn find_all(&self) -> Result<Vec<Item>, ServiceError> {
        let rows = models::item::find_all(&self.db).await.map_err(db_err)?;
        Ok(rows.into_iter().map(Item::from).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Item>, ServiceError> {
        let row = models::item::find_by_id(&self.db, id).await.map_err(db_err)?;
        Ok(row.map(Item::from))
    }

    async fn save(&self, item: Item) -> Result<Item, ServiceError> {
        let saved = models::item::upsert(&self.db, item.into()).await.map_err(db_err)?;
        Ok(saved.into())
    }

    async fn exists_by_id(&self, id: &str) -> Result<bool, ServiceError> {
        models::item::exists(&self.db, id).await.map_err(db_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn seaorm_repository_roundtrip() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await? else { return Ok(()); };
        let repo = SeaOrmItemRepository::new(db);

        let id = format!("svc_item_{}", uuid::Uuid::new_v4());
        assert!(!repo.exists_by_id(&id).await?);

        let saved = repo
            .save(Item { id: id.clone(), name: "Fries".into(), description: None, price: 2.5 })
            .await?;
        assert_eq!(repo.find_by_id(&id).await?, Some(saved.clone()));
        assert!(repo.find_all().await?.contains(&saved));

        let updated = repo
            .save(Item { id: id.clone(), name: "Large fries".into(), description: Some("salted".into()), price: 3.0 })
            .await?;
        assert_eq!(repo.find_by_id(&id).await?, Some(updated));
        Ok(())
    }
}
