//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20220101_000020_create_perfume;
mod m20220101_000021_add_perfume_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20220101_000020_create_perfume::Migration),
            // Indexes should always be applied last
            Box::new(m20220101_000021_add_perfume_indexes::Migration),
        ]
    }
}
