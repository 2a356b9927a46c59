mod common;
mod support;

use actix_web::test;
use courier::db::require_db;
use courier::repos::agents;
use courier::routes::auth::{MSG_AGENT_CREATED, MSG_BAD_CREDENTIALS, MSG_USERNAME_TAKEN};
use courier_test_support::unique_username;
use serde_json::Value;

use crate::common::assert_problem_details_structure;
use crate::support::factory::{self, form_request, multipart_request};
use crate::support::multipart::MultipartBody;
use crate::support::{build_test_state, create_test_app};

#[actix_web::test]
async fn test_create_agent_then_login() -> Result<(), Box<dyn std::error::Error>> {
    let ts = build_test_state().await?;
    let app = create_test_app(ts.state).with_prod_routes().build().await?;
    let username = unique_username("ana");

    let created = factory::post_form(
        &app,
        "/crear_agente/",
        &[("usuario", username.as_str()), ("password", "secreta")],
    )
    .await;
    assert_eq!(created["status"], "ok");
    assert_eq!(created["msg"], MSG_AGENT_CREATED);
    let agent_id = created["agente_id"].as_i64().unwrap();
    assert!(agent_id > 0);

    let login = factory::login(&app, &username, "secreta").await;
    assert_eq!(login["status"], "ok");
    assert_eq!(login["agente_id"].as_i64().unwrap(), agent_id);
    assert!(login.get("msg").is_none());

    Ok(())
}

#[actix_web::test]
async fn test_login_with_wrong_password_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let ts = build_test_state().await?;
    let app = create_test_app(ts.state).with_prod_routes().build().await?;
    let username = unique_username("luis");
    factory::create_agent(&app, &username, "correcta").await;

    let login = factory::login(&app, &username, "incorrecta").await;
    assert_eq!(login["status"], "error");
    assert_eq!(login["msg"], MSG_BAD_CREDENTIALS);
    assert!(login.get("agente_id").is_none());

    Ok(())
}

#[actix_web::test]
async fn test_login_unknown_user_looks_like_bad_password() -> Result<(), Box<dyn std::error::Error>>
{
    let ts = build_test_state().await?;
    let app = create_test_app(ts.state).with_prod_routes().build().await?;

    let login = factory::login(&app, &unique_username("ghost"), "whatever").await;
    assert_eq!(login["status"], "error");
    assert_eq!(login["msg"], MSG_BAD_CREDENTIALS);

    Ok(())
}

#[actix_web::test]
async fn test_duplicate_username_is_reported_in_body() -> Result<(), Box<dyn std::error::Error>> {
    let ts = build_test_state().await?;
    let app = create_test_app(ts.state).with_prod_routes().build().await?;
    let username = unique_username("dup");

    let first = factory::create_agent(&app, &username, "one").await;
    let second = factory::post_form(
        &app,
        "/crear_agente/",
        &[("usuario", username.as_str()), ("password", "two")],
    )
    .await;

    assert_eq!(second["status"], "error");
    assert_eq!(second["msg"], MSG_USERNAME_TAKEN);

    // The original password still works and still maps to the first agent.
    let login = factory::login(&app, &username, "one").await;
    assert_eq!(login["agente_id"].as_i64().unwrap(), i64::from(first));

    Ok(())
}

#[actix_web::test]
async fn test_missing_password_field_is_400() -> Result<(), Box<dyn std::error::Error>> {
    let ts = build_test_state().await?;
    let app = create_test_app(ts.state).with_prod_routes().build().await?;

    let req = form_request("/login/", &[("usuario", "ana")]);
    let resp = test::call_service(&app, req).await;

    assert_problem_details_structure(resp, 400, "MISSING_FIELD", None).await;
    Ok(())
}

#[actix_web::test]
async fn test_routes_accept_both_slash_variants() -> Result<(), Box<dyn std::error::Error>> {
    let ts = build_test_state().await?;
    let app = create_test_app(ts.state).with_prod_routes().build().await?;
    let username = unique_username("slash");

    let created: Value = factory::post_form(
        &app,
        "/crear_agente",
        &[("usuario", username.as_str()), ("password", "pw")],
    )
    .await;
    assert_eq!(created["status"], "ok");

    let login = factory::post_form(
        &app,
        "/login",
        &[("usuario", username.as_str()), ("password", "pw")],
    )
    .await;
    assert_eq!(login["status"], "ok");

    Ok(())
}

#[actix_web::test]
async fn test_same_password_gets_distinct_salted_hashes() -> Result<(), Box<dyn std::error::Error>>
{
    let ts = build_test_state().await?;
    let db = require_db(&ts.state)?.clone();
    let app = create_test_app(ts.state).with_prod_routes().build().await?;

    let a = unique_username("salt_a");
    let b = unique_username("salt_b");
    factory::create_agent(&app, &a, "shared-secret").await;
    factory::create_agent(&app, &b, "shared-secret").await;

    let agent_a = agents::find_by_username(&db, &a).await?.expect("agent a");
    let agent_b = agents::find_by_username(&db, &b).await?.expect("agent b");

    assert!(agent_a.password_hash.starts_with("$argon2"));
    assert_ne!(agent_a.password_hash, "shared-secret");
    assert_ne!(agent_a.password_hash, agent_b.password_hash);

    Ok(())
}

#[actix_web::test]
async fn test_multipart_forms_are_accepted() -> Result<(), Box<dyn std::error::Error>> {
    let ts = build_test_state().await?;
    let app = create_test_app(ts.state).with_prod_routes().build().await?;
    let username = unique_username("mp");

    let body = MultipartBody::new()
        .text("usuario", &username)
        .text("password", "1234")
        .finish();
    let resp = test::call_service(&app, multipart_request("/crear_agente/", body)).await;
    assert_eq!(resp.status().as_u16(), 200);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["status"], "ok");
    assert_eq!(created["msg"], MSG_AGENT_CREATED);

    let body = MultipartBody::new()
        .text("usuario", &username)
        .text("password", "1234")
        .finish();
    let resp = test::call_service(&app, multipart_request("/login/", body)).await;
    assert_eq!(resp.status().as_u16(), 200);
    let login: Value = test::read_body_json(resp).await;
    assert_eq!(login["status"], "ok");
    assert_eq!(login["agente_id"], created["agente_id"]);

    Ok(())
}

#[actix_web::test]
async fn test_multipart_login_missing_password_is_400() -> Result<(), Box<dyn std::error::Error>>
{
    let ts = build_test_state().await?;
    let app = create_test_app(ts.state).with_prod_routes().build().await?;

    let body = MultipartBody::new().text("usuario", "ana").finish();
    let resp = test::call_service(&app, multipart_request("/login/", body)).await;

    assert_problem_details_structure(resp, 400, "MISSING_FIELD", None).await;
    Ok(())
}
