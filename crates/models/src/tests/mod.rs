
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};

/// Fresh in-memory SQLite database with all migrations applied.
pub async fn setup_test_db() -> anyhow::Result<DatabaseConnection> {
    let mut opt = sea_orm::ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
