//! Package repository functions for domain layer (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;

use crate::adapters::packages_sea::{self as packages_adapter, PackageCreate};
use crate::entities::packages;
use crate::errors::domain::DomainError;

/// Package domain model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pub id: i32,
    pub recipient: Option<String>,
    pub address: String,
    pub agent_id: i32,
}

pub async fn create_package<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    recipient: Option<&str>,
    address: &str,
    agent_id: i32,
) -> Result<Package, DomainError> {
    let mut dto = PackageCreate::new(address, agent_id);
    if let Some(recipient) = recipient {
        dto = dto.with_recipient(recipient);
    }
    let package = packages_adapter::create_package(conn, dto).await?;
    Ok(Package::from(package))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    package_id: i32,
) -> Result<Option<Package>, DomainError> {
    let package = packages_adapter::find_by_id(conn, package_id).await?;
    Ok(package.map(Package::from))
}

pub async fn find_by_agent<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    agent_id: i32,
) -> Result<Vec<Package>, DomainError> {
    let packages = packages_adapter::find_by_agent(conn, agent_id).await?;
    Ok(packages.into_iter().map(Package::from).collect())
}

impl From<packages::Model> for Package {
    fn from(model: packages::Model) -> Self {
        Self {
            id: model.id,
            recipient: model.recipient,
            address: model.address,
            agent_id: model.agent_id,
        }
    }
}
