//! Flat directory of uploaded files, served back under `/uploads/`.
//!
//! Names are single path components. A write to an existing name truncates
//! and replaces it.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// URL prefix (without leading slash) under which stored blobs are served.
pub const UPLOADS_URL_PREFIX: &str = "uploads";

#[derive(Debug, Error)]
pub enum BlobError {
    #[error("invalid blob name: '{0}'")]
    InvalidName(String),
    #[error("blob I/O failed for '{name}': {source}")]
    Io {
        name: String,
        #[source]
        source: io::Error,
    },
}

/// Result of a successful [`BlobStore::put`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    pub name: String,
    pub path: PathBuf,
    /// Relative URL path, e.g. `uploads/7_2_door.jpg`.
    pub url_path: String,
    pub size: u64,
}

#[derive(Debug, Clone)]
pub struct BlobStore {
    root: PathBuf,
}

impl BlobStore {
    /// Open the store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, BlobError> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|source| BlobError::Io {
            name: root.display().to_string(),
            source,
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `bytes` under `name`, replacing any previous content.
    pub async fn put(&self, name: &str, bytes: &[u8]) -> Result<StoredBlob, BlobError> {
        let path = self.path_for(name)?;
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|source| BlobError::Io {
                name: name.to_string(),
                source,
            })?;
        debug!(blob = %name, size = bytes.len(), "blob stored");
        Ok(StoredBlob {
            name: name.to_string(),
            path,
            url_path: Self::url_path(name),
            size: bytes.len() as u64,
        })
    }

    pub async fn read(&self, name: &str) -> Result<Vec<u8>, BlobError> {
        let path = self.path_for(name)?;
        tokio::fs::read(&path).await.map_err(|source| BlobError::Io {
            name: name.to_string(),
            source,
        })
    }

    pub fn url_path(name: &str) -> String {
        format!("{UPLOADS_URL_PREFIX}/{name}")
    }

    fn path_for(&self, name: &str) -> Result<PathBuf, BlobError> {
        match sanitize_filename(name) {
            Some(clean) if clean == name => Ok(self.root.join(clean)),
            _ => Err(BlobError::InvalidName(name.to_string())),
        }
    }
}

/// Final path component of a client-supplied filename, or `None` when
/// nothing usable is left. The component is returned unchanged, surrounding
/// whitespace included.
///
/// Both `/` and `\` count as separators so Windows-style paths from
/// browsers are reduced too.
pub fn sanitize_filename(raw: &str) -> Option<&str> {
    let last = raw.rsplit(['/', '\\']).next()?;
    match last.trim() {
        "" | "." | ".." => None,
        _ if last.contains('\0') => None,
        _ => Some(last),
    }
}

/// Stored name for a delivery photo: `{package_id}_{agent_id}_{filename}`.
pub fn delivery_photo_name(
    package_id: i32,
    agent_id: i32,
    original_filename: &str,
) -> Result<String, BlobError> {
    let file = sanitize_filename(original_filename)
        .ok_or_else(|| BlobError::InvalidName(original_filename.to_string()))?;
    Ok(format!("{package_id}_{agent_id}_{file}"))
}
