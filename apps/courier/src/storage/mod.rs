//! Local-disk storage for delivery photos.

pub mod blob_store;

pub use blob_store::{delivery_photo_name, BlobError, BlobStore, StoredBlob, UPLOADS_URL_PREFIX};
