use std::ops::Deref;

use actix_multipart::Multipart;
use actix_web::dev::{Payload, UrlEncoded};
use actix_web::error::UrlencodedError;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::delivery_upload::{multipart_error, read_field};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::trace_ctx;

const MULTIPART_FORM: &str = "multipart/form-data";

/// Form extractor accepting `application/x-www-form-urlencoded` or
/// `multipart/form-data` (text parts only). Failures render as problem
/// details (HTTP 400) instead of actix's plain-text errors.
#[derive(Debug)]
pub struct ValidatedForm<T>(pub T);

impl<T> ValidatedForm<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValidatedForm<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> FromRequest for ValidatedForm<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let path = req.path().to_string();

        if req.content_type() == MULTIPART_FORM {
            let multipart = Multipart::new(req.headers(), payload.take());
            return Box::pin(async move {
                let pairs = read_text_parts(multipart).await?;
                decode_pairs(&pairs)
                    .map(ValidatedForm)
                    .map_err(|e| form_error(&path, e))
            });
        }

        let decode = UrlEncoded::<T>::new(req, payload);
        Box::pin(async move {
            decode
                .await
                .map(ValidatedForm)
                .map_err(|e| form_error(&path, e))
        })
    }
}

/// Text parts of a multipart form as `(name, value)` pairs. File parts are
/// drained and ignored.
async fn read_text_parts(mut multipart: Multipart) -> Result<Vec<(String, String)>, AppError> {
    let mut pairs = Vec::new();
    while let Some(field) = multipart.next().await {
        let mut field = field.map_err(multipart_error)?;
        let name = field.name().unwrap_or_default().to_string();
        let is_file = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .is_some();
        let raw = read_field(&mut field).await?;
        if is_file || name.is_empty() {
            continue;
        }
        let value = String::from_utf8(raw.to_vec()).map_err(|_| {
            AppError::bad_request(ErrorCode::InvalidField, format!("field '{name}' is not UTF-8"))
        })?;
        pairs.push((name, value));
    }
    Ok(pairs)
}

/// Run multipart pairs through the same decoder as urlencoded bodies so both
/// encodings share field parsing and error classification.
fn decode_pairs<T: DeserializeOwned>(pairs: &[(String, String)]) -> Result<T, UrlencodedError> {
    let encoded = serde_urlencoded::to_string(pairs).map_err(UrlencodedError::Serialize)?;
    serde_urlencoded::from_str(&encoded).map_err(UrlencodedError::Parse)
}

fn form_error(path: &str, e: UrlencodedError) -> AppError {
    let (code, detail) = classify_form_error(&e);
    debug!(
        trace_id = %trace_ctx::trace_id(),
        path = %path,
        error = %e,
        "form decoding failed"
    );
    AppError::bad_request(code, detail)
}

/// Map a decoding failure to an error code and a client-facing message.
fn classify_form_error(error: &UrlencodedError) -> (ErrorCode, String) {
    match error {
        UrlencodedError::Parse(e) => {
            let msg = e.to_string();
            if msg.starts_with("missing field") {
                (ErrorCode::MissingField, msg)
            } else {
                (ErrorCode::InvalidField, format!("Invalid form field: {msg}"))
            }
        }
        UrlencodedError::ContentType => (
            ErrorCode::BadRequest,
            "Expected an application/x-www-form-urlencoded or multipart/form-data body"
                .to_string(),
        ),
        UrlencodedError::Overflow { .. } => {
            (ErrorCode::BadRequest, "Form body is too large".to_string())
        }
        _ => (ErrorCode::BadRequest, "Malformed form body".to_string()),
    }
}
