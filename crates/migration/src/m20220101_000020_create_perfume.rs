//! Create `perfume` table.
//!
//! Stores catalog entries; `filename` stays null until an image is uploaded.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Perfume::Table)
                    .if_not_exists()
                    .col(pk_auto(Perfume::Id))
                    .col(string_len(Perfume::PerfumeTitle, 255).not_null())
                    .col(string_len(Perfume::Perfumer, 255).not_null())
                    .col(integer(Perfume::Year).not_null())
                    .col(string_len(Perfume::Country, 128).not_null())
                    .col(string_len(Perfume::PerfumeGender, 32).not_null())
                    .col(string_len(Perfume::FragranceTopNotes, 512).not_null())
                    .col(string_len(Perfume::FragranceMiddleNotes, 512).not_null())
                    .col(string_len(Perfume::FragranceBaseNotes, 512).not_null())
                    .col(
                        ColumnDef::new(Perfume::Description)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Perfume::Filename)
                            .string_len(512)
                            .null(),
                    )
                    .col(integer(Perfume::Price).not_null())
                    .col(string_len(Perfume::Volume, 32).not_null())
                    .col(string_len(Perfume::PerfumeType, 64).not_null())
                    .col(timestamp_with_time_zone(Perfume::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Perfume::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Perfume::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Perfume {
    Table,
    Id,
    PerfumeTitle,
    Perfumer,
    Year,
    Country,
    PerfumeGender,
    FragranceTopNotes,
    FragranceMiddleNotes,
    FragranceBaseNotes,
    Description,
    Filename,
    Price,
    Volume,
    PerfumeType,
    CreatedAt,
    UpdatedAt,
}
