use sea_orm::{entity::prelude::*, sea_query::OnConflict, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};

use crate::errors;

pub const MAX_ID_LEN: usize = 64;
pub const MAX_NAME_LEN: usize = 255;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "item")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub price: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_id(id: &str) -> Result<(), errors::ModelError> {
    if id.trim().is_empty() {
        return Err(errors::ModelError::Validation("id must not be blank".into()));
    }
    if id.len() > MAX_ID_LEN {
        return Err(errors::ModelError::Validation(format!("id must be at most {MAX_ID_LEN} bytes")));
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() {
        return Err(errors::ModelError::Validation("name required".into()));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(errors::ModelError::Validation(format!("name must be at most {MAX_NAME_LEN} characters")));
    }
    Ok(())
}

pub fn validate_price(price: f64) -> Result<(), errors::ModelError> {
    if !price.is_finite() {
        return Err(errors::ModelError::Validation("price must be a finite number".into()));
    }
    if price < 0.0 {
        return Err(errors::ModelError::Validation("price must be >= 0".into()));
    }
    Ok(())
}

/// `-0.0` passes `validate_price`; store it as `0.0`.
pub fn normalize_price(price: f64) -> f64 {
    if price == 0.0 { 0.0 } else { price }
}

pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<Model>, errors::ModelError> {
    Entity::find().all(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn find_by_id(db: &DatabaseConnection, id: &str) -> Result<Option<Model>, errors::ModelError> {
    Entity::find_by_id(id.to_string())
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn exists(db: &DatabaseConnection, id: &str) -> Result<bool, errors::ModelError> {
    let n = Entity::find_by_id(id.to_string())
        .count(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(n > 0)
}

/// Insert or fully overwrite the row keyed by `item.id`.
pub async fn upsert(db: &DatabaseConnection, item: Model) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        id: Set(item.id),
        name: Set(item.name),
        description: Set(item.description),
        price: Set(item.price),
    };
    Entity::insert(am)
        .on_conflict(
            OnConflict::column(Column::Id)
                .update_columns([Column::Name, Column::Description, Column::Price])
                .to_owned(),
        )
        .exec_with_returning(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}
