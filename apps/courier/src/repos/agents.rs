//! Agent repository functions for domain layer (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;

use crate::adapters::agents_sea::{self as agents_adapter, AgentCreate};
use crate::entities::agents;
use crate::errors::domain::DomainError;

/// Agent domain model. `password_hash` is a PHC string, never the password.
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
    pub created_at: time::PrimitiveDateTime,
}

pub async fn find_by_username<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    username: &str,
) -> Result<Option<Agent>, DomainError> {
    let agent = agents_adapter::find_by_username(conn, username).await?;
    Ok(agent.map(Agent::from))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    agent_id: i32,
) -> Result<Option<Agent>, DomainError> {
    let agent = agents_adapter::find_by_id(conn, agent_id).await?;
    Ok(agent.map(Agent::from))
}

/// Fails with `ConflictKind::UniqueUsername` when the name is taken.
pub async fn create_agent<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    username: &str,
    password_hash: &str,
) -> Result<Agent, DomainError> {
    let agent = agents_adapter::create_agent(conn, AgentCreate::new(username, password_hash)).await?;
    Ok(Agent::from(agent))
}

impl From<agents::Model> for Agent {
    fn from(model: agents::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            password_hash: model.password_hash,
            created_at: model.created_at,
        }
    }
}
