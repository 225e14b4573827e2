use std::fmt;

use serde::{Deserialize, Serialize};

use crate::util::{new_ulid, now_ms, EpochMs};
use crate::validation::ValidWish;

/// Processing status of a wish.
///
/// The service only ever assigns [`WishStatus::INITIAL`]; the other values are
/// set and interpreted by downstream consumers. A value outside `1..=4` cannot
/// be constructed or deserialized.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "u8", into = "u8")]
pub struct WishStatus(u8);

impl WishStatus {
    /// Status assigned to every newly created wish.
    pub const INITIAL: Self = Self(1);

    /// Raw integer value as stored and sent on the wire.
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl Default for WishStatus {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl TryFrom<u8> for WishStatus {
    type Error = InvalidStatus;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1..=4 => Ok(Self(value)),
            other => Err(InvalidStatus(other)),
        }
    }
}

impl From<WishStatus> for u8 {
    fn from(status: WishStatus) -> Self {
        status.0
    }
}

impl fmt::Display for WishStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rejected status value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid wish status {0} (expected 1, 2, 3 or 4)")]
pub struct InvalidStatus(pub u8);

/// A persisted wish.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WishRecord {
    /// Storage identifier (ULID).
    pub id: String,
    /// Submitter name; unique across all records.
    pub name: String,
    /// Free-text wish.
    pub wish: String,
    /// Processing status.
    pub status: WishStatus,
    /// Creation time, never changed afterwards.
    pub created_at: EpochMs,
}

impl WishRecord {
    /// Builds the record to persist for a validated submission.
    pub fn new(valid: ValidWish) -> Self {
        let (name, wish) = valid.into_parts();
        Self {
            id: new_ulid().to_string(),
            name,
            wish,
            status: WishStatus::INITIAL,
            created_at: now_ms(),
        }
    }
}

/// Submission body for `POST /api/wishes`.
///
/// Both fields are optional at the wire level so that a missing field is
/// reported as a validation failure rather than a decode failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewWish {
    /// Submitter name.
    #[serde(default)]
    pub name: Option<String>,
    /// Free-text wish.
    #[serde(default)]
    pub wish: Option<String>,
}

impl NewWish {
    /// Convenience constructor for clients.
    pub fn new(name: impl Into<String>, wish: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            wish: Some(wish.into()),
        }
    }
}
