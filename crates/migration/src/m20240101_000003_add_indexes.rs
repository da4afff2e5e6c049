use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Beer: listing filters hit style and name
        manager
            .create_index(
                Index::create()
                    .name("idx_beer_style")
                    .table(Beer::Table)
                    .col(Beer::BeerStyle)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_beer_name")
                    .table(Beer::Table)
                    .col(Beer::BeerName)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_beer_style").table(Beer::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_beer_name").table(Beer::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Beer { Table, BeerStyle, BeerName }
