//! Proof-of-delivery upload endpoint.

use actix_web::{web, HttpRequest, HttpResponse};
use serde::Serialize;

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::DeliveryUpload;
use crate::services::deliveries::DeliveryService;
use crate::state::app_state::AppState;

pub const MSG_DELIVERY_RECORDED: &str = "Entrega registrada";

#[derive(Debug, Serialize)]
struct DeliveryResponse {
    status: &'static str,
    msg: &'static str,
    #[serde(rename = "foto_url")]
    photo_url: String,
    lat: f64,
    lon: f64,
}

async fn deliver(
    req: HttpRequest,
    upload: DeliveryUpload,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let submission = upload.into_inner();
    let blobs = app_state.blobs.clone();

    let receipt = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { DeliveryService::new(&blobs).deliver(txn, submission).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(DeliveryResponse {
        status: "ok",
        msg: MSG_DELIVERY_RECORDED,
        photo_url: receipt.photo_url,
        lat: receipt.lat,
        lon: receipt.lon,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource(["/entregar/", "/entregar"]).route(web::post().to(deliver)));
}
