pub mod agents;
pub mod deliveries;
pub mod packages;

pub use agents::Entity as Agents;
pub use agents::Model as Agent;
pub use deliveries::Entity as Deliveries;
pub use deliveries::Model as Delivery;
pub use packages::Entity as Packages;
pub use packages::Model as Package;
