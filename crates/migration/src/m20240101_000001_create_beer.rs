//! Create `beer` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Beer::Table)
                    .if_not_exists()
                    .col(uuid(Beer::Id).primary_key())
                    .col(integer(Beer::Version).not_null())
                    .col(string_len(Beer::BeerName, 50).not_null())
                    .col(string_len(Beer::BeerStyle, 32).not_null())
                    .col(string_len(Beer::Upc, 255).unique_key().not_null())
                    .col(integer(Beer::QuantityOnHand).not_null())
                    .col(decimal_len(Beer::Price, 19, 4).not_null())
                    .col(timestamp_with_time_zone(Beer::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Beer::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Beer::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Beer { Table, Id, Version, BeerName, BeerStyle, Upc, QuantityOnHand, Price, CreatedAt, UpdatedAt }
