use serde::{Deserialize, Serialize};

/// JSON body returned by the wish endpoints on failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    /// Human readable message.
    pub message: String,
}

impl ErrorBody {
    /// Wraps a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Health probe outcome as reported on the wire.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum HealthStatus {
    /// Store reachable.
    Ok,
    /// Store unreachable.
    Fail,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    /// `"OK"` or `"FAIL"`.
    pub status: HealthStatus,
    /// Cause of the failure, absent when healthy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthResponse {
    /// Healthy response.
    pub fn ok() -> Self {
        Self {
            status: HealthStatus::Ok,
            error: None,
        }
    }

    /// Unhealthy response carrying the probe's cause.
    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Fail,
            error: Some(error.into()),
        }
    }
}
