use std::net::SocketAddr;

use common::utils::logging::init_logging_from_env;
use configs::AppConfig;
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_from_env();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// `config.toml` when present, otherwise defaults plus environment variables.
pub fn load_config() -> Result<AppConfig, StartupError> {
    match configs::load_default() {
        Ok(mut cfg) => {
            cfg.normalize_and_validate()
                .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
            Ok(cfg)
        }
        Err(e) => {
            warn!(error = %e, "config file unavailable; falling back to environment");
            AppConfig::from_env().map_err(|e| StartupError::InvalidConfig(e.to_string()))
        }
    }
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bad bind address: {e}")))
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cfg = load_config()?;

    common::env::ensure_static_dirs(&cfg.storage.static_resources_path)
        .await
        .map_err(|e| StartupError::Runtime(e.to_string()))?;

    // DB connection
    let db = models::db::connect_with_config(&cfg.database).await?;
    if cfg.database.run_migrations {
        migration::Migrator::up(&db, None).await?;
        info!("database migrations applied");
    }

    let state = ServerState::new(db, &cfg.storage.static_resources_path);

    // Build router
    let app = routes::build_router(state, build_cors(), cfg.storage.max_upload_bytes);

    // Bind and serve
    let addr = bind_addr(&cfg)?;
    info!(%addr, static_root = %cfg.storage.static_resources_path, "starting catalog server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
