//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

/// Ensure the static resources root and its `uploads` directory exist.
///
/// Returns the uploads directory so callers can log or serve it.
pub async fn ensure_static_dirs(static_root: &str) -> anyhow::Result<PathBuf> {
    if tokio::fs::metadata(static_root).await.is_err() {
        warn!(%static_root, "static resources directory not found; creating it");
    }
    let uploads = Path::new(static_root).join("uploads");
    tokio::fs::create_dir_all(&uploads)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", uploads.display()))?;
    info!(uploads = %uploads.display(), "static uploads directory ready");
    Ok(uploads)
}
