//! Create `item` table.
//! One row per menu entry, keyed by a string id.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Item::Table)
                    .if_not_exists()
                    .col(string_len(Item::Id, 64).primary_key())
                    .col(string_len(Item::Name, 255).not_null())
                    .col(text_null(Item::Description))
                    .col(
                        double(Item::Price)
                            .not_null()
                            .check(Expr::col(Item::Price).gte(0.0)),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Item::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Item {
    Table,
    Id,
    Name,
    Description,
    Price,
}
