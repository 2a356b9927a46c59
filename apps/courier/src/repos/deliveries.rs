//! Delivery repository functions for domain layer (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;

use crate::adapters::deliveries_sea::{self as deliveries_adapter, DeliveryCreate};
use crate::entities::deliveries;
use crate::errors::domain::DomainError;

/// Delivery domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub id: i32,
    pub package_id: i32,
    pub agent_id: i32,
    pub photo_path: String,
    pub lat: f64,
    pub lon: f64,
    pub delivered_at: time::PrimitiveDateTime,
}

pub async fn create_delivery<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: DeliveryCreate,
) -> Result<Delivery, DomainError> {
    let delivery = deliveries_adapter::create_delivery(conn, dto).await?;
    Ok(Delivery::from(delivery))
}

pub async fn find_by_package<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    package_id: i32,
) -> Result<Vec<Delivery>, DomainError> {
    let deliveries = deliveries_adapter::find_by_package(conn, package_id).await?;
    Ok(deliveries.into_iter().map(Delivery::from).collect())
}

impl From<deliveries::Model> for Delivery {
    fn from(model: deliveries::Model) -> Self {
        Self {
            id: model.id,
            package_id: model.package_id,
            agent_id: model.agent_id,
            photo_path: model.photo_path,
            lat: model.lat,
            lon: model.lon,
            delivered_at: model.delivered_at,
        }
    }
}
