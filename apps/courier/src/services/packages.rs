//! Package creation and per-agent listing.

use sea_orm::ConnectionTrait;
use tracing::info;

use crate::error::AppError;
use crate::repos::packages::{self, Package};

/// Insert a package. `agent_id` is stored as given, without checking that the
/// agent exists.
pub async fn create_package<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    recipient: Option<&str>,
    address: &str,
    agent_id: i32,
) -> Result<i32, AppError> {
    let package = packages::create_package(conn, recipient, address, agent_id).await?;
    info!(package_id = package.id, agent_id, "package created");
    Ok(package.id)
}

/// Packages assigned to `agent_id`, ordered by id. Empty when there are none.
pub async fn list_packages<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    agent_id: i32,
) -> Result<Vec<Package>, AppError> {
    Ok(packages::find_by_agent(conn, agent_id).await?)
}
