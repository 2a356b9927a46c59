//! SeaORM adapter for deliveries.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::deliveries;

pub mod dto;

pub use dto::DeliveryCreate;

/// Insert a delivery; `delivered_at` is filled by the column default.
pub async fn create_delivery<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: DeliveryCreate,
) -> Result<deliveries::Model, sea_orm::DbErr> {
    deliveries::ActiveModel {
        id: NotSet,
        package_id: Set(dto.package_id),
        agent_id: Set(dto.agent_id),
        photo_path: Set(dto.photo_path),
        lat: Set(dto.lat),
        lon: Set(dto.lon),
        delivered_at: NotSet,
    }
    .insert(conn)
    .await
}

/// Every delivery recorded for `package_id`, in insertion order.
pub async fn find_by_package<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    package_id: i32,
) -> Result<Vec<deliveries::Model>, sea_orm::DbErr> {
    deliveries::Entity::find()
        .filter(deliveries::Column::PackageId.eq(package_id))
        .order_by_asc(deliveries::Column::Id)
        .all(conn)
        .await
}
