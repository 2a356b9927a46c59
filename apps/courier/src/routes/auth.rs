//! Agent login and registration endpoints.

use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::ValidatedForm;
use crate::services::agents::{self, AgentCreation, LoginOutcome};
use crate::state::app_state::AppState;

pub const MSG_BAD_CREDENTIALS: &str = "Credenciales incorrectas";
pub const MSG_AGENT_CREATED: &str = "Agente creado";
pub const MSG_USERNAME_TAKEN: &str = "Usuario ya existe";

#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    #[serde(rename = "usuario")]
    pub username: String,
    pub password: String,
}

/// `{"status":"ok",...}` or `{"status":"error","msg":...}`, always HTTP 200.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum LoginResponse {
    Ok {
        #[serde(rename = "agente_id")]
        agent_id: i32,
    },
    Error {
        msg: &'static str,
    },
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum CreateAgentResponse {
    Ok {
        msg: &'static str,
        #[serde(rename = "agente_id")]
        agent_id: i32,
    },
    Error {
        msg: &'static str,
    },
}

async fn login(
    req: HttpRequest,
    form: ValidatedForm<CredentialsForm>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let CredentialsForm { username, password } = form.into_inner();

    let outcome = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { agents::login(txn, &username, &password).await })
    })
    .await?;

    let body = match outcome {
        LoginOutcome::Accepted { agent_id } => LoginResponse::Ok { agent_id },
        LoginOutcome::Rejected => LoginResponse::Error {
            msg: MSG_BAD_CREDENTIALS,
        },
    };
    Ok(HttpResponse::Ok().json(body))
}

async fn create_agent(
    req: HttpRequest,
    form: ValidatedForm<CredentialsForm>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let CredentialsForm { username, password } = form.into_inner();

    let creation = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { agents::create_agent(txn, &username, &password).await })
    })
    .await?;

    let body = match creation {
        AgentCreation::Created { agent_id } => CreateAgentResponse::Ok {
            msg: MSG_AGENT_CREATED,
            agent_id,
        },
        AgentCreation::UsernameTaken => CreateAgentResponse::Error {
            msg: MSG_USERNAME_TAKEN,
        },
    };
    Ok(HttpResponse::Ok().json(body))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource(["/login/", "/login"]).route(web::post().to(login)))
        .service(
            web::resource(["/crear_agente/", "/crear_agente"]).route(web::post().to(create_agent)),
        );
}
