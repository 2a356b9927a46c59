//! DTOs for deliveries_sea adapter.

#[derive(Debug, Clone)]
pub struct DeliveryCreate {
    pub package_id: i32,
    pub agent_id: i32,
    pub photo_path: String,
    pub lat: f64,
    pub lon: f64,
}
