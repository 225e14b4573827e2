use thiserror::Error;
use tracing::{error, info};
use wishes_core::{validate_new_wish, NewWish, ValidationError, WishRecord};

use crate::store::{StoreError, WishStore};

/// Failure of a service operation, as seen by callers.
///
/// `Display` is the user-facing message; the store cause is kept as the
/// error source for logging only.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Name and wish are required.")]
    Validation(#[from] ValidationError),
    /// The store rejected the write (duplicate name included) or was unreachable.
    #[error("Error saving the wish.")]
    Save(#[source] StoreError),
    #[error("Error retrieving wishes.")]
    Load(#[source] StoreError),
}

/// Outcome of the store liveness probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Health {
    Ok,
    Unavailable(String),
}

/// Validates submissions and delegates persistence to a [`WishStore`].
///
/// Holds no state of its own besides the store handle.
#[derive(Clone)]
pub struct WishService<S> {
    store: S,
}

impl<S: WishStore> WishService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validate and persist a new wish with the initial status.
    ///
    /// Validation happens before any store call. There is no existence check
    /// for the name; a conflicting write is rejected by the store itself.
    pub async fn submit(&self, req: NewWish) -> Result<WishRecord, ServiceError> {
        let valid = validate_new_wish(req).inspect_err(|e| {
            error!(error = %e, "POST /api/wishes - missing fields");
        })?;

        let record = WishRecord::new(valid);
        let stored = self.store.insert(record).await.map_err(|e| {
            error!(error = %e, "POST /api/wishes - failed to save");
            ServiceError::Save(e)
        })?;

        info!(id = %stored.id, name = %stored.name, "wish created");
        Ok(stored)
    }

    /// All stored wishes in store order.
    pub async fn list_all(&self) -> Result<Vec<WishRecord>, ServiceError> {
        self.store.list().await.map_err(|e| {
            error!(error = %e, "GET /api/wishes - failed to load");
            ServiceError::Load(e)
        })
    }

    pub async fn health_check(&self) -> Health {
        match self.store.ping().await {
            Ok(()) => Health::Ok,
            Err(e) => {
                error!(error = %e, "GET /health - store unreachable");
                Health::Unavailable(e.to_string())
            }
        }
    }
}
