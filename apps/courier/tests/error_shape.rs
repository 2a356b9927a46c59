mod common;
mod support;

use actix_web::test;
use courier::errors::ErrorCode;
use courier::AppError;
use serde_json::Value;

use crate::common::{assert_problem_details_structure, assert_trace_id_matches};
use crate::support::factory::form_request;
use crate::support::test_state::build_test_state_without_db;
use crate::support::create_test_app;

fn trace_header(headers: &actix_web::http::header::HeaderMap) -> String {
    headers
        .get("x-trace-id")
        .and_then(|v| v.to_str().ok())
        .expect("x-trace-id header")
        .to_string()
}

#[actix_web::test]
async fn test_success_responses_carry_trace_id() -> Result<(), Box<dyn std::error::Error>> {
    let ts = build_test_state_without_db().await?;
    let app = create_test_app(ts.state).with_prod_routes().build().await?;

    let first = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    let second = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

    let a = trace_header(first.headers());
    let b = trace_header(second.headers());
    assert!(uuid_like(&a), "trace id should be a UUID: {a}");
    assert_ne!(a, b);

    Ok(())
}

#[actix_web::test]
async fn test_handler_error_body_matches_header() -> Result<(), Box<dyn std::error::Error>> {
    let ts = build_test_state_without_db().await?;
    let app = create_test_app(ts.state).with_prod_routes().build().await?;

    let req = form_request("/login/", &[("usuario", "ana"), ("password", "x")]);
    let resp = test::call_service(&app, req).await;

    let json = assert_problem_details_structure(
        resp,
        500,
        "DB_UNAVAILABLE",
        Some("Database is not configured"),
    )
    .await;
    assert_eq!(json["title"], "Db Unavailable");

    Ok(())
}

#[actix_web::test]
async fn test_custom_route_error_uses_request_trace_id() -> Result<(), Box<dyn std::error::Error>>
{
    let ts = build_test_state_without_db().await?;
    let app = create_test_app(ts.state)
        .with_routes(|cfg| {
            cfg.route(
                "/boom",
                actix_web::web::get().to(|| async {
                    Err::<actix_web::HttpResponse, _>(AppError::bad_request(
                        ErrorCode::BadRequest,
                        "nope",
                    ))
                }),
            );
        })
        .build()
        .await?;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/boom").to_request()).await;
    let header = trace_header(resp.headers());
    let body = test::read_body(resp).await;
    let json: Value = serde_json::from_slice(&body)?;
    assert_trace_id_matches(&json, &header);
    assert_eq!(json["code"], "BAD_REQUEST");

    Ok(())
}

#[actix_web::test]
async fn test_unknown_route_still_has_trace_id() -> Result<(), Box<dyn std::error::Error>> {
    let ts = build_test_state_without_db().await?;
    let app = create_test_app(ts.state).with_prod_routes().build().await?;

    let req = test::TestRequest::get().uri("/no/such/route").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 404);
    assert!(resp.headers().contains_key("x-trace-id"));
    Ok(())
}

fn uuid_like(s: &str) -> bool {
    s.len() == 36 && s.chars().filter(|c| *c == '-').count() == 4
}
