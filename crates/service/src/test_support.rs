#![cfg(test)]
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use migration::MigratorTrait;
use models::perfume::PerfumeDraft;

/// Fresh in-memory SQLite database with migrations applied.
///
/// One pooled connection only: every SQLite memory connection is its own database.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

pub fn sample_draft(title: &str, perfumer: &str, price: i32) -> PerfumeDraft {
    PerfumeDraft {
        perfume_title: title.into(),
        perfumer: perfumer.into(),
        year: 2015,
        country: "France".into(),
        perfume_gender: "female".into(),
        fragrance_top_notes: "bergamot".into(),
        fragrance_middle_notes: "rose".into(),
        fragrance_base_notes: "musk".into(),
        price,
        volume: "100".into(),
        perfume_type: "Eau de Parfum".into(),
        ..Default::default()
    }
}
