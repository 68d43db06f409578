use anyhow::Result;
use sea_orm::EntityTrait;
use uuid::Uuid;

use crate::db::{connect, migrate};
use crate::item;

fn skip_db_tests() -> bool {
    std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err()
}

#[tokio::test]
async fn test_item_upsert_and_lookup() -> Result<()> {
    if skip_db_tests() {
        return Ok(());
    }
    let db = connect().await?;
    migrate(&db).await?;

    let id = format!("it_{}", Uuid::new_v4());
    assert!(!item::exists(&db, &id).await?);
    assert!(item::find_by_id(&db, &id).await?.is_none());

    let created = item::upsert(
        &db,
        item::Model { id: id.clone(), name: "Burger".into(), description: None, price: 5.99 },
    )
    .await?;
    assert_eq!(created.name, "Burger");
    assert!(item::exists(&db, &id).await?);

    let replaced = item::upsert(
        &db,
        item::Model { id: id.clone(), name: "Cheeseburger".into(), description: Some("with cheddar".into()), price: 6.49 },
    )
    .await?;
    assert_eq!(replaced.id, id);
    assert_eq!(replaced.price, 6.49);

    let found = item::find_by_id(&db, &id).await?.expect("row present");
    assert_eq!(found, replaced);
    assert!(item::find_all(&db).await?.iter().any(|m| m.id == id));

    item::Entity::delete_by_id(id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_negative_price_rejected_by_schema() -> Result<()> {
    if skip_db_tests() {
        return Ok(());
    }
    let db = connect().await?;
    migrate(&db).await?;

    let res = item::upsert(
        &db,
        item::Model { id: format!("neg_{}", Uuid::new_v4()), name: "Broken".into(), description: None, price: -1.0 },
    )
    .await;
    assert!(matches!(res, Err(crate::errors::ModelError::Db(_))));
    Ok(())
}
