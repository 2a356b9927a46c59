//! Request helpers that drive the public endpoints the way a client would.

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header::CONTENT_TYPE;
use actix_web::{test, Error};
use serde_json::Value;

use super::multipart;

pub fn form_request(uri: &str, fields: &[(&str, &str)]) -> Request {
    test::TestRequest::post()
        .uri(uri)
        .set_form(fields)
        .to_request()
}

pub fn multipart_request(uri: &str, body: Vec<u8>) -> Request {
    test::TestRequest::post()
        .uri(uri)
        .insert_header((CONTENT_TYPE, multipart::content_type()))
        .set_payload(body)
        .to_request()
}

pub fn delivery_request(body: Vec<u8>) -> Request {
    multipart_request("/entregar/", body)
}

/// POST a form and return the JSON body, asserting HTTP 200.
pub async fn post_form<S>(app: &S, uri: &str, fields: &[(&str, &str)]) -> Value
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let resp = test::call_service(app, form_request(uri, fields)).await;
    assert_eq!(resp.status().as_u16(), 200, "POST {uri} should answer 200");
    test::read_body_json(resp).await
}

/// Register an agent and return its id.
pub async fn create_agent<S>(app: &S, username: &str, password: &str) -> i32
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let json = post_form(
        app,
        "/crear_agente/",
        &[("usuario", username), ("password", password)],
    )
    .await;
    assert_eq!(json["status"], "ok", "agent creation failed: {json}");
    json["agente_id"].as_i64().expect("agente_id") as i32
}

pub async fn login<S>(app: &S, username: &str, password: &str) -> Value
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    post_form(app, "/login/", &[("usuario", username), ("password", password)]).await
}

/// Create a package for `agent_id` and return its id.
pub async fn create_package<S>(app: &S, recipient: &str, address: &str, agent_id: i32) -> i32
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let agent = agent_id.to_string();
    let json = post_form(
        app,
        "/crear_paquete/",
        &[
            ("destinatario", recipient),
            ("direccion", address),
            ("agente_id", agent.as_str()),
        ],
    )
    .await;
    assert_eq!(json["status"], "ok", "package creation failed: {json}");
    json["paquete_id"].as_i64().expect("paquete_id") as i32
}

pub async fn list_packages<S>(app: &S, agent_id: i32) -> Vec<Value>
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let req = test::TestRequest::get()
        .uri(&format!("/paquetes/{agent_id}"))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let json: Value = test::read_body_json(resp).await;
    json.as_array().cloned().expect("package list should be an array")
}

/// Upload a delivery and return the JSON body, asserting HTTP 200.
pub async fn deliver<S>(
    app: &S,
    package_id: i32,
    agent_id: i32,
    lat: f64,
    lon: f64,
    filename: &str,
    photo: &[u8],
) -> Value
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let body = multipart::delivery_body(package_id, agent_id, lat, lon, filename, photo);
    let resp = test::call_service(app, delivery_request(body)).await;
    assert_eq!(resp.status().as_u16(), 200, "delivery upload should answer 200");
    test::read_body_json(resp).await
}
