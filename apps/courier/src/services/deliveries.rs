//! Proof-of-delivery submission: photo to the blob store, row to the database.

use bytes::Bytes;
use sea_orm::ConnectionTrait;
use tracing::{info, warn};

use crate::adapters::deliveries_sea::DeliveryCreate;
use crate::error::AppError;
use crate::repos::deliveries;
use crate::storage::{delivery_photo_name, BlobStore};

/// A delivery as received from an agent.
#[derive(Debug, Clone)]
pub struct DeliverySubmission {
    pub package_id: i32,
    pub agent_id: i32,
    pub lat: f64,
    pub lon: f64,
    /// Client-supplied filename; only its last path component is kept.
    pub filename: String,
    pub photo: Bytes,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryReceipt {
    pub delivery_id: i32,
    /// Relative URL of the stored photo, e.g. `uploads/1_1_photo.jpg`.
    pub photo_url: String,
    pub lat: f64,
    pub lon: f64,
}

pub struct DeliveryService<'a> {
    blobs: &'a BlobStore,
}

impl<'a> DeliveryService<'a> {
    pub fn new(blobs: &'a BlobStore) -> Self {
        Self { blobs }
    }

    /// Store the photo under `{package_id}_{agent_id}_{filename}`, then record
    /// the delivery.
    ///
    /// Neither the package nor the agent is looked up. An existing photo with
    /// the same name is overwritten. If the insert fails the file stays behind.
    pub async fn deliver<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        submission: DeliverySubmission,
    ) -> Result<DeliveryReceipt, AppError> {
        let DeliverySubmission {
            package_id,
            agent_id,
            lat,
            lon,
            filename,
            photo,
        } = submission;

        let name = delivery_photo_name(package_id, agent_id, &filename)?;
        let stored = self.blobs.put(&name, &photo).await?;

        let dto = DeliveryCreate {
            package_id,
            agent_id,
            photo_path: stored.url_path.clone(),
            lat,
            lon,
        };
        let delivery = match deliveries::create_delivery(conn, dto).await {
            Ok(delivery) => delivery,
            Err(e) => {
                warn!(
                    package_id,
                    agent_id,
                    photo = %stored.url_path,
                    error = %e,
                    "delivery insert failed; stored photo left in place"
                );
                return Err(e.into());
            }
        };

        info!(
            delivery_id = delivery.id,
            package_id,
            agent_id,
            size = stored.size,
            photo = %stored.url_path,
            "delivery recorded"
        );

        Ok(DeliveryReceipt {
            delivery_id: delivery.id,
            photo_url: stored.url_path,
            lat: delivery.lat,
            lon: delivery.lon,
        })
    }
}
