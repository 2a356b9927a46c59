use actix_cors::Cors;
use actix_web::http::header;

/// Build the CORS middleware.
///
/// With no configured origins every origin, method and header is allowed.
/// When `CORS_ALLOWED_ORIGINS` lists origins, only those are accepted.
pub fn cors_middleware(allowed_origins: &[String]) -> Cors {
    let origins: Vec<&str> = allowed_origins
        .iter()
        .map(|s| s.trim())
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .collect();

    if origins.is_empty() {
        return Cors::permissive();
    }

    let mut cors = Cors::default()
        .allow_any_method()
        .allow_any_header()
        .expose_headers(vec![header::HeaderName::from_static("x-trace-id")])
        .supports_credentials()
        .max_age(3600);

    for origin in origins {
        cors = cors.allowed_origin(origin);
    }

    cors
}
