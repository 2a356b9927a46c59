use std::str::FromStr;

use actix_multipart::{Field, Multipart, MultipartError};
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use bytes::{Bytes, BytesMut};
use futures_util::StreamExt;
use tracing::debug;

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::services::deliveries::DeliverySubmission;
use crate::trace_ctx;

/// Multipart body of a delivery: `paquete_id`, `agente_id`, `lat`, `lon` and
/// the photo in `file`. Fields may arrive in any order; the photo is
/// buffered in memory. Unknown fields are skipped.
#[derive(Debug)]
pub struct DeliveryUpload(pub DeliverySubmission);

impl DeliveryUpload {
    pub fn into_inner(self) -> DeliverySubmission {
        self.0
    }
}

impl FromRequest for DeliveryUpload {
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let multipart = Multipart::new(req.headers(), payload.take());
        Box::pin(async move { read_upload(multipart).await.map(DeliveryUpload) })
    }
}

#[derive(Default)]
struct PartialUpload {
    package_id: Option<i32>,
    agent_id: Option<i32>,
    lat: Option<f64>,
    lon: Option<f64>,
    file: Option<(Option<String>, Bytes)>,
}

async fn read_upload(mut multipart: Multipart) -> Result<DeliverySubmission, AppError> {
    let mut upload = PartialUpload::default();

    while let Some(field) = multipart.next().await {
        let mut field = field.map_err(multipart_error)?;
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "paquete_id" => upload.package_id = Some(parse_text(&name, &mut field).await?),
            "agente_id" => upload.agent_id = Some(parse_text(&name, &mut field).await?),
            "lat" => upload.lat = Some(parse_text(&name, &mut field).await?),
            "lon" => upload.lon = Some(parse_text(&name, &mut field).await?),
            "file" => {
                let filename = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename())
                    .map(str::to_owned);
                let bytes = read_field(&mut field).await?;
                upload.file = Some((filename, bytes));
            }
            other => {
                debug!(trace_id = %trace_ctx::trace_id(), field = %other, "skipping unknown multipart field");
                read_field(&mut field).await?;
            }
        }
    }

    let (filename, photo) = upload.file.ok_or_else(|| missing("file"))?;
    let filename = filename
        .filter(|f| !f.trim().is_empty())
        .ok_or_else(|| {
            AppError::bad_request(ErrorCode::InvalidFilename, "Uploaded file has no filename")
        })?;

    Ok(DeliverySubmission {
        package_id: upload.package_id.ok_or_else(|| missing("paquete_id"))?,
        agent_id: upload.agent_id.ok_or_else(|| missing("agente_id"))?,
        lat: upload.lat.ok_or_else(|| missing("lat"))?,
        lon: upload.lon.ok_or_else(|| missing("lon"))?,
        filename,
        photo,
    })
}

pub(crate) async fn read_field(field: &mut Field) -> Result<Bytes, AppError> {
    let mut buf = BytesMut::new();
    while let Some(chunk) = field.next().await {
        buf.extend_from_slice(&chunk.map_err(multipart_error)?);
    }
    Ok(buf.freeze())
}

async fn parse_text<T: FromStr>(name: &str, field: &mut Field) -> Result<T, AppError> {
    let raw = read_field(field).await?;
    let text = std::str::from_utf8(&raw).map_err(|_| {
        AppError::bad_request(ErrorCode::InvalidField, format!("field '{name}' is not UTF-8"))
    })?;
    parse_value(name, text)
}

fn parse_value<T: FromStr>(name: &str, text: &str) -> Result<T, AppError> {
    text.trim().parse::<T>().map_err(|_| {
        AppError::bad_request(
            ErrorCode::InvalidField,
            format!("field '{name}' has an invalid value: '{}'", text.trim()),
        )
    })
}

fn missing(name: &str) -> AppError {
    AppError::bad_request(ErrorCode::MissingField, format!("field '{name}' is required"))
}

pub(crate) fn multipart_error(e: MultipartError) -> AppError {
    debug!(trace_id = %trace_ctx::trace_id(), error = %e, "multipart decoding failed");
    AppError::bad_request(ErrorCode::BadRequest, format!("Malformed multipart body: {e}"))
}
