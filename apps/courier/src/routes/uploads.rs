//! Read-only static serving of the blob store.

use actix_files::Files;

use crate::storage::{BlobStore, UPLOADS_URL_PREFIX};

/// `GET /uploads/{name}` straight from the upload directory. No directory
/// listing, no access control.
pub fn files_service(blobs: &BlobStore) -> Files {
    Files::new(&format!("/{UPLOADS_URL_PREFIX}"), blobs.root())
}
