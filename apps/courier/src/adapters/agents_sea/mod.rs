//! SeaORM adapter for agents.

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set};

use crate::entities::agents;

pub mod dto;

pub use dto::AgentCreate;

pub async fn find_by_username<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    username: &str,
) -> Result<Option<agents::Model>, sea_orm::DbErr> {
    agents::Entity::find()
        .filter(agents::Column::Username.eq(username))
        .one(conn)
        .await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    agent_id: i32,
) -> Result<Option<agents::Model>, sea_orm::DbErr> {
    agents::Entity::find_by_id(agent_id).one(conn).await
}

/// Insert an agent; `created_at` is filled by the column default.
pub async fn create_agent<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: AgentCreate,
) -> Result<agents::Model, sea_orm::DbErr> {
    agents::ActiveModel {
        id: NotSet,
        username: Set(dto.username),
        password_hash: Set(dto.password_hash),
        created_at: NotSet,
    }
    .insert(conn)
    .await
}
