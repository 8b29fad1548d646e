//! Create `shared_links` table.
//! One row per shared payload; `data` holds the JSON text verbatim.
//! `if_not_exists` keeps databases seeded by earlier deployments usable.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SharedLinks::Table)
                    .if_not_exists()
                    .col(string(SharedLinks::Id).primary_key())
                    .col(text(SharedLinks::Data))
                    .col(
                        timestamp_with_time_zone(SharedLinks::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(SharedLinks::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum SharedLinks {
    Table,
    Id,
    Data,
    #[sea_orm(iden = "createdAt")]
    CreatedAt,
}
