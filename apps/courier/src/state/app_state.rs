use sea_orm::DatabaseConnection;

use crate::storage::BlobStore;

/// Application state containing shared resources
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database connection (optional for test scenarios)
    pub db: Option<DatabaseConnection>,
    /// Upload directory for delivery photos
    pub blobs: BlobStore,
}

impl AppState {
    pub fn new(db: DatabaseConnection, blobs: BlobStore) -> Self {
        Self {
            db: Some(db),
            blobs,
        }
    }

    pub fn new_without_db(blobs: BlobStore) -> Self {
        Self { db: None, blobs }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }
}
