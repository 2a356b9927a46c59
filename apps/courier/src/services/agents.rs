//! Agent login and registration.

use sea_orm::ConnectionTrait;
use tracing::{debug, info};

use crate::auth::{hash_password, verify_password};
use crate::error::AppError;
use crate::logging::pii::Redacted;
use crate::repos::agents;

/// Result of a login attempt. A rejection is an ordinary outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Accepted { agent_id: i32 },
    Rejected,
}

/// Result of an agent registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentCreation {
    Created { agent_id: i32 },
    UsernameTaken,
}

/// Check `password` against the stored hash for `username`.
///
/// Unknown usernames and wrong passwords both yield `Rejected`.
pub async fn login<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    username: &str,
    password: &str,
) -> Result<LoginOutcome, AppError> {
    let Some(agent) = agents::find_by_username(conn, username).await? else {
        debug!(username = %Redacted(username), "login rejected: unknown username");
        return Ok(LoginOutcome::Rejected);
    };

    if verify_password(password, &agent.password_hash).await? {
        info!(agent_id = agent.id, "login accepted");
        Ok(LoginOutcome::Accepted { agent_id: agent.id })
    } else {
        debug!(agent_id = agent.id, "login rejected: password mismatch");
        Ok(LoginOutcome::Rejected)
    }
}

/// Register a new agent with a salted password hash.
///
/// A username already present, including one inserted concurrently between
/// the lookup and the insert, yields `UsernameTaken`.
pub async fn create_agent<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    username: &str,
    password: &str,
) -> Result<AgentCreation, AppError> {
    if agents::find_by_username(conn, username).await?.is_some() {
        debug!(username = %Redacted(username), "agent registration: username taken");
        return Ok(AgentCreation::UsernameTaken);
    }

    insert_agent(conn, username, password).await
}

/// Hash and insert without the prior lookup. A unique-index hit means another
/// request registered the name first.
async fn insert_agent<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    username: &str,
    password: &str,
) -> Result<AgentCreation, AppError> {
    let password_hash = hash_password(password).await?;

    match agents::create_agent(conn, username, &password_hash).await {
        Ok(agent) => {
            info!(agent_id = agent.id, username = %Redacted(username), "agent created");
            Ok(AgentCreation::Created { agent_id: agent.id })
        }
        Err(e) if e.is_username_conflict() => {
            debug!(username = %Redacted(username), "agent registration lost a race on username");
            Ok(AgentCreation::UsernameTaken)
        }
        Err(e) => Err(e.into()),
    }
}
