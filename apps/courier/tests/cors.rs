mod common;

use actix_web::http::header;
use actix_web::{test, web, App, HttpResponse};
use courier::cors_middleware;

async fn ok() -> HttpResponse {
    HttpResponse::Ok().finish()
}

#[actix_web::test]
async fn test_default_policy_allows_any_origin_preflight() {
    let app = test::init_service(
        App::new()
            .wrap(cors_middleware(&[]))
            .route("/login/", web::post().to(ok)),
    )
    .await;

    let req = test::TestRequest::default()
        .method(actix_web::http::Method::OPTIONS)
        .uri("/login/")
        .insert_header((header::ORIGIN, "http://anything.example"))
        .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());
    assert_eq!(
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("http://anything.example")
    );
}

#[actix_web::test]
async fn test_restricted_policy_only_echoes_listed_origin() {
    let allowed = vec!["https://app.courier.example".to_string()];
    let app = test::init_service(
        App::new()
            .wrap(cors_middleware(&allowed))
            .route("/health", web::get().to(ok)),
    )
    .await;

    let good = test::TestRequest::get()
        .uri("/health")
        .insert_header((header::ORIGIN, "https://app.courier.example"))
        .to_request();
    let resp = test::call_service(&app, good).await;
    assert!(resp.status().is_success());
    assert_eq!(
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("https://app.courier.example")
    );

    let bad = test::TestRequest::get()
        .uri("/health")
        .insert_header((header::ORIGIN, "https://evil.example"))
        .to_request();
    let resp = test::call_service(&app, bad).await;
    assert!(resp
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}
