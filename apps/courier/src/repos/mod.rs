//! Repository functions: domain models over the SeaORM adapters.

pub mod agents;
pub mod deliveries;
pub mod packages;
