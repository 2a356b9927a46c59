//! SeaORM adapter for packages.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::packages;

pub mod dto;

pub use dto::PackageCreate;

pub async fn create_package<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: PackageCreate,
) -> Result<packages::Model, sea_orm::DbErr> {
    packages::ActiveModel {
        id: NotSet,
        recipient: Set(dto.recipient),
        address: Set(dto.address),
        agent_id: Set(dto.agent_id),
    }
    .insert(conn)
    .await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    package_id: i32,
) -> Result<Option<packages::Model>, sea_orm::DbErr> {
    packages::Entity::find_by_id(package_id).one(conn).await
}

/// Packages assigned to `agent_id`, oldest first.
pub async fn find_by_agent<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    agent_id: i32,
) -> Result<Vec<packages::Model>, sea_orm::DbErr> {
    packages::Entity::find()
        .filter(packages::Column::AgentId.eq(agent_id))
        .order_by_asc(packages::Column::Id)
        .all(conn)
        .await
}
