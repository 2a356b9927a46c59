//! DTOs for agents_sea adapter.

/// DTO for creating a new agent. The password must already be hashed.
#[derive(Debug, Clone)]
pub struct AgentCreate {
    pub username: String,
    pub password_hash: String,
}

impl AgentCreate {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
        }
    }
}
