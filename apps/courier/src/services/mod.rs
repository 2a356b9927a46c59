pub mod agents;
pub mod deliveries;
pub mod packages;
