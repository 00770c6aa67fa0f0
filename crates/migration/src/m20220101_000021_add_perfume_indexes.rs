use sea_orm_migration::prelude::*;

use crate::m20220101_000020_create_perfume::Perfume;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Brand lookups and brand filter
        manager
            .create_index(
                Index::create()
                    .name("idx_perfume_perfumer")
                    .table(Perfume::Table)
                    .col(Perfume::Perfumer)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Gender lookups and gender filter
        manager
            .create_index(
                Index::create()
                    .name("idx_perfume_gender")
                    .table(Perfume::Table)
                    .col(Perfume::PerfumeGender)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Price range filter and price ordering
        manager
            .create_index(
                Index::create()
                    .name("idx_perfume_price")
                    .table(Perfume::Table)
                    .col(Perfume::Price)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in ["idx_perfume_price", "idx_perfume_gender", "idx_perfume_perfumer"] {
            manager
                .drop_index(Index::drop().name(name).table(Perfume::Table).to_owned())
                .await?;
        }
        Ok(())
    }
}
