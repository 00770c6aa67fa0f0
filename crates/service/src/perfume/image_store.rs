use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::debug;
use uuid::Uuid;

use crate::errors::ServiceError;

/// Public URL prefix under which uploaded images are served.
pub const UPLOADS_PREFIX: &str = "/uploads/";

const FALLBACK_NAME: &str = "image";

/// A file written by [`ImageStore::store`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredImage {
    /// `<uuid>.<original name>`
    pub file_name: String,
    /// `/uploads/<file_name>`, stored on the entity.
    pub public_path: String,
    pub disk_path: PathBuf,
}

/// Local-disk store for product images.
///
/// Files land in `<static_root>/uploads`. The static root is fixed at construction.
#[derive(Clone, Debug)]
pub struct ImageStore {
    static_root: PathBuf,
}

impl ImageStore {
    pub fn new<P: Into<PathBuf>>(static_root: P) -> Self {
        Self { static_root: static_root.into() }
    }

    pub fn static_root(&self) -> &Path { &self.static_root }

    pub fn uploads_dir(&self) -> PathBuf { self.static_root.join("uploads") }

    /// `<uuid>.<original>`, keeping the whole original name (not just its extension).
    pub fn generate_file_name(original_name: Option<&str>) -> String {
        let base = original_name
            .and_then(|n| Path::new(n).file_name())
            .and_then(|n| n.to_str())
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(FALLBACK_NAME);
        format!("{}.{}", Uuid::new_v4(), base)
    }

    /// Write `bytes` under a freshly generated name, creating the uploads directory if absent.
    pub async fn store(&self, original_name: Option<&str>, bytes: &[u8]) -> Result<StoredImage, ServiceError> {
        let dir = self.uploads_dir();
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| ServiceError::Storage(format!("cannot create {}: {e}", dir.display())))?;

        let file_name = Self::generate_file_name(original_name);
        let disk_path = dir.join(&file_name);
        fs::write(&disk_path, bytes)
            .await
            .map_err(|e| ServiceError::Storage(format!("cannot write {}: {e}", disk_path.display())))?;
        debug!(path = %disk_path.display(), size = bytes.len(), "image written");

        Ok(StoredImage {
            public_path: format!("{UPLOADS_PREFIX}{file_name}"),
            file_name,
            disk_path,
        })
    }

    /// Map a `/uploads/<name>` path back to its file on disk.
    pub fn resolve(&self, public_path: &str) -> Result<PathBuf, ServiceError> {
        let name = public_path
            .strip_prefix(UPLOADS_PREFIX)
            .filter(|n| !n.is_empty() && Path::new(n).file_name() == Some(std::ffi::OsStr::new(n)))
            .ok_or_else(|| ServiceError::Validation(format!("not an uploads path: {public_path}")))?;
        Ok(self.uploads_dir().join(name))
    }

    /// Delete a previously stored image.
    pub async fn remove(&self, public_path: &str) -> Result<(), ServiceError> {
        let path = self.resolve(public_path)?;
        fs::remove_file(&path)
            .await
            .map_err(|e| ServiceError::Storage(format!("cannot remove {}: {e}", path.display())))
    }
}
