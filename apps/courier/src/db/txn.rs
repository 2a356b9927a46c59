use std::sync::Arc;

use actix_web::{HttpMessage, HttpRequest};
use futures::future::BoxFuture;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use tracing::warn;

use super::require_db;
use crate::error::AppError;
use crate::state::app_state::AppState;

/// A transaction shared through request extensions.
///
/// When present, `with_txn` runs inside it and leaves commit/rollback to the
/// owner. Tests use this to keep every request of a case in one transaction.
#[derive(Clone)]
pub struct SharedTxn(pub Arc<DatabaseTransaction>);

impl SharedTxn {
    pub async fn open(db: &DatabaseConnection) -> Result<Self, AppError> {
        Ok(Self(Arc::new(db.begin().await?)))
    }

    pub fn transaction(&self) -> &DatabaseTransaction {
        &self.0
    }

    /// The shared transaction injected into `req`, if any.
    pub fn from_req(req: &HttpRequest) -> Option<Self> {
        req.extensions().get::<SharedTxn>().cloned()
    }

    /// Attach to a request (or a test `Request`) before it is dispatched.
    pub fn inject<M: HttpMessage>(&self, req: &M) {
        req.extensions_mut().insert(self.clone());
    }

    /// Roll back; fails if a clone is still alive somewhere.
    pub async fn rollback(self) -> Result<(), AppError> {
        let txn = Arc::try_unwrap(self.0)
            .map_err(|_| AppError::internal("shared transaction is still referenced"))?;
        txn.rollback().await?;
        Ok(())
    }
}

/// Execute `f` within a database transaction.
///
/// 1) A `SharedTxn` in request extensions is used as-is (no commit/rollback here)
/// 2) Otherwise a new transaction is opened, committed on Ok and rolled back on Err
pub async fn with_txn<R, F>(
    req: Option<&HttpRequest>,
    state: &AppState,
    f: F,
) -> Result<R, AppError>
where
    F: for<'a> FnOnce(&'a DatabaseTransaction) -> BoxFuture<'a, Result<R, AppError>>,
{
    // Clone out of the extensions map before awaiting so no RefCell borrow is held.
    let shared_txn = req.and_then(SharedTxn::from_req);

    if let Some(shared) = shared_txn {
        return f(shared.transaction()).await;
    }

    let db = require_db(state)?;
    let txn = db.begin().await?;

    match f(&txn).await {
        Ok(val) => {
            txn.commit().await?;
            Ok(val)
        }
        Err(err) => {
            // Best-effort rollback; the original error wins.
            if let Err(rollback_err) = txn.rollback().await {
                warn!(error = %rollback_err, "rollback failed");
            }
            Err(err)
        }
    }
}
