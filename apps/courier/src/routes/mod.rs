use actix_web::web;

use crate::storage::BlobStore;

pub mod auth;
pub mod deliveries;
pub mod health;
pub mod packages;
pub mod uploads;

/// Register every API route. Each path answers both with and without the
/// trailing slash.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes)
        .configure(auth::configure_routes)
        .configure(packages::configure_routes)
        .configure(deliveries::configure_routes);
}

/// API routes plus static serving of `blobs` under `/uploads`.
pub fn configure_with_uploads(blobs: BlobStore) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        configure(cfg);
        cfg.service(uploads::files_service(&blobs));
    }
}
