use serde::{Deserialize, Serialize};
use tracing::debug;
use wishes_core::{EpochMs, WishRecord, WishStatus};

use super::{StoreError, WishStore};
use crate::db::Db;

/// Document as stored in the `wish` table; the record id carries `WishRecord::id`.
#[derive(Debug, Clone, Serialize)]
struct WishDoc {
    name: String,
    wish: String,
    status: i64,
    created_at: EpochMs,
}

/// Row shape returned by the list query.
#[derive(Debug, Clone, Deserialize)]
struct WishRow {
    id: String,
    name: String,
    wish: String,
    status: i64,
    created_at: EpochMs,
}

impl TryFrom<WishRow> for WishRecord {
    type Error = StoreError;

    fn try_from(row: WishRow) -> Result<Self, Self::Error> {
        let status = u8::try_from(row.status)
            .ok()
            .and_then(|raw| WishStatus::try_from(raw).ok())
            .ok_or_else(|| {
                StoreError::Query(format!("wish:{} has invalid status {}", row.id, row.status))
            })?;
        Ok(WishRecord {
            id: row.id,
            name: row.name,
            wish: row.wish,
            status,
            created_at: row.created_at,
        })
    }
}

/// `WishStore` backed by SurrealDB; uniqueness comes from the
/// `wish_name_unique` index defined in the schema.
#[derive(Clone)]
pub struct SurrealStore {
    db: Db,
}

impl SurrealStore {
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

impl WishStore for SurrealStore {
    async fn insert(&self, record: WishRecord) -> Result<WishRecord, StoreError> {
        let doc = WishDoc {
            name: record.name.clone(),
            wish: record.wish.clone(),
            status: i64::from(record.status.get()),
            created_at: record.created_at,
        };

        let q = r#"
            CREATE type::thing('wish', $id) CONTENT $doc RETURN NONE;
        "#;
        self.db
            .inner()
            .query(q)
            .bind(("id", record.id.clone()))
            .bind(("doc", doc))
            .await
            .and_then(|resp| resp.check())
            .map_err(|e| classify(e, &record.name))?;

        debug!(id = %record.id, name = %record.name, "wish stored");
        Ok(record)
    }

    async fn list(&self) -> Result<Vec<WishRecord>, StoreError> {
        let q = r#"
            SELECT record::id(id) AS id, name, wish, status, created_at FROM wish;
        "#;
        let mut resp = self
            .db
            .inner()
            .query(q)
            .await
            .map_err(|e| classify(e, ""))?;
        let rows: Vec<WishRow> = resp.take(0).map_err(|e| classify(e, ""))?;
        rows.into_iter().map(WishRecord::try_from).collect()
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.db
            .inner()
            .health()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }
}

fn classify(err: surrealdb::Error, name: &str) -> StoreError {
    let msg = err.to_string();
    if msg.contains("already contains") {
        // Unique index violation: "Database index `wish_name_unique` already contains ...".
        // Remote engines report it as an API error, so check the message first.
        StoreError::Duplicate(name.to_string())
    } else if matches!(err, surrealdb::Error::Api(_)) {
        StoreError::Unavailable(msg)
    } else {
        StoreError::Query(msg)
    }
}
