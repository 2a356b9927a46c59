//! Package creation and listing endpoints.

use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::{AgentIdPath, ValidatedForm};
use crate::repos::packages::Package;
use crate::services::packages;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreatePackageForm {
    #[serde(rename = "destinatario")]
    pub recipient: String,
    #[serde(rename = "direccion")]
    pub address: String,
    #[serde(rename = "agente_id")]
    pub agent_id: i32,
}

#[derive(Debug, Serialize)]
struct CreatePackageResponse {
    status: &'static str,
    #[serde(rename = "paquete_id")]
    package_id: i32,
}

/// Wire shape of a listed package.
#[derive(Debug, Serialize, PartialEq)]
pub struct PackageView {
    pub id: i32,
    #[serde(rename = "destinatario")]
    pub recipient: Option<String>,
    #[serde(rename = "direccion")]
    pub address: String,
    #[serde(rename = "agente_id")]
    pub agent_id: i32,
}

impl From<Package> for PackageView {
    fn from(p: Package) -> Self {
        Self {
            id: p.id,
            recipient: p.recipient,
            address: p.address,
            agent_id: p.agent_id,
        }
    }
}

async fn create_package(
    req: HttpRequest,
    form: ValidatedForm<CreatePackageForm>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let CreatePackageForm {
        recipient,
        address,
        agent_id,
    } = form.into_inner();

    let package_id = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            packages::create_package(txn, Some(&recipient), &address, agent_id).await
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(CreatePackageResponse {
        status: "ok",
        package_id,
    }))
}

async fn list_packages(
    req: HttpRequest,
    agent_id: AgentIdPath,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let AgentIdPath(agent_id) = agent_id;

    let listed = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { packages::list_packages(txn, agent_id).await })
    })
    .await?;

    let body: Vec<PackageView> = listed.into_iter().map(PackageView::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource(["/crear_paquete/", "/crear_paquete"]).route(web::post().to(create_package)),
    )
    .service(
        web::resource(["/paquetes/{agente_id}", "/paquetes/{agente_id}/"])
            .route(web::get().to(list_packages)),
    );
}
