//! Persistence seam for wish records.

pub mod memory;
pub mod surreal;

use std::future::Future;

use thiserror::Error;
use wishes_core::WishRecord;

pub use memory::MemoryStore;
pub use surreal::SurrealStore;

/// Storage-side failure.
///
/// The variants exist for logging; callers of the service see one
/// persistence outcome regardless of which one occurred.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("a wish named {0:?} already exists")]
    Duplicate(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("store query failed: {0}")]
    Query(String),
}

/// Durable collection of wish records with a uniqueness constraint on `name`.
///
/// Implementations must reject a conflicting insert atomically; the service
/// never checks for an existing name before writing.
pub trait WishStore: Send + Sync + 'static {
    /// Persist `record`, failing with [`StoreError::Duplicate`] if its name is taken.
    fn insert(&self, record: WishRecord)
        -> impl Future<Output = Result<WishRecord, StoreError>> + Send;

    /// Every stored record, in store order.
    fn list(&self) -> impl Future<Output = Result<Vec<WishRecord>, StoreError>> + Send;

    /// Lightweight liveness probe.
    fn ping(&self) -> impl Future<Output = Result<(), StoreError>> + Send;
}
