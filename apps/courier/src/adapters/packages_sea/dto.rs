//! DTOs for packages_sea adapter.

#[derive(Debug, Clone)]
pub struct PackageCreate {
    pub recipient: Option<String>,
    pub address: String,
    pub agent_id: i32,
}

impl PackageCreate {
    pub fn new(address: impl Into<String>, agent_id: i32) -> Self {
        Self {
            recipient: None,
            address: address.into(),
            agent_id,
        }
    }

    pub fn with_recipient(mut self, recipient: impl Into<String>) -> Self {
        self.recipient = Some(recipient.into());
        self
    }
}
