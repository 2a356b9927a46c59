use std::path::PathBuf;

use db_infra::db::{DbKind, RuntimeEnv};
use db_infra::{bootstrap_db, bootstrap_db_at};

use crate::error::AppError;
use crate::state::app_state::AppState;
use crate::storage::BlobStore;

enum DbSource {
    None,
    /// Connection spec derived from the environment.
    Kind(DbKind),
    /// Explicit URL, e.g. a SQLite file inside a test tempdir.
    Url { url: String, kind: DbKind },
}

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    env: RuntimeEnv,
    db: DbSource,
    upload_dir: PathBuf,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            env: RuntimeEnv::Prod,
            db: DbSource::None,
            upload_dir: PathBuf::from("uploads"),
        }
    }

    pub fn with_env(mut self, env: RuntimeEnv) -> Self {
        self.env = env;
        self
    }

    pub fn with_db(mut self, kind: DbKind) -> Self {
        self.db = DbSource::Kind(kind);
        self
    }

    pub fn with_db_url(mut self, url: impl Into<String>, kind: DbKind) -> Self {
        self.db = DbSource::Url {
            url: url.into(),
            kind,
        };
        self
    }

    pub fn with_upload_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.upload_dir = dir.into();
        self
    }

    /// Open the blob store, then connect and migrate the database if one was
    /// requested.
    pub async fn build(self) -> Result<AppState, AppError> {
        let blobs = BlobStore::open(&self.upload_dir)?;
        let conn = match self.db {
            DbSource::None => return Ok(AppState::new_without_db(blobs)),
            DbSource::Kind(kind) => bootstrap_db(self.env, kind).await?,
            DbSource::Url { url, kind } => bootstrap_db_at(&url, kind).await?,
        };
        Ok(AppState::new(conn, blobs))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
