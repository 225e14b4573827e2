use reqwest::{Client, StatusCode};
use thiserror::Error;
use wishes_core::api::{ErrorBody, HealthResponse};
use wishes_core::{NewWish, WishRecord};

#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced an HTTP response.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The service answered with a non-success status.
    #[error("{url} returned {status}: {message}")]
    Status {
        url: String,
        status: StatusCode,
        message: String,
    },
    /// A success response whose body did not decode.
    #[error("decoding response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl ClientError {
    /// HTTP status of the failure, if the service answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport { .. } | Self::Decode { .. } => None,
        }
    }
}

/// Typed client for the wish service's HTTP API.
#[derive(Debug, Clone)]
pub struct WishesClient {
    http: Client,
    base_url: String,
}

impl WishesClient {
    /// `base_url` is the service root, e.g. `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn wishes_url(&self) -> String {
        format!("{}/api/wishes", self.base_url)
    }

    /// `POST /api/wishes`.
    pub async fn submit(&self, req: &NewWish) -> Result<WishRecord, ClientError> {
        let url = self.wishes_url();
        let resp = self
            .http
            .post(&url)
            .json(req)
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                url: url.clone(),
                source,
            })?;
        decode(url, resp).await
    }

    /// `GET /api/wishes`.
    pub async fn list(&self) -> Result<Vec<WishRecord>, ClientError> {
        let url = self.wishes_url();
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                url: url.clone(),
                source,
            })?;
        decode(url, resp).await
    }

    /// `POST /api/wishes`, reporting only the response status. The body is
    /// left unread.
    pub async fn submit_status(&self, req: &NewWish) -> Result<StatusCode, ClientError> {
        let url = self.wishes_url();
        self.http
            .post(&url)
            .json(req)
            .send()
            .await
            .map(|resp| resp.status())
            .map_err(|source| ClientError::Transport { url, source })
    }

    /// `GET /api/wishes`, reporting only the response status. The body is
    /// left unread.
    pub async fn list_status(&self) -> Result<StatusCode, ClientError> {
        let url = self.wishes_url();
        self.http
            .get(&url)
            .send()
            .await
            .map(|resp| resp.status())
            .map_err(|source| ClientError::Transport { url, source })
    }

    /// `GET /health`. An unhealthy service is a normal answer, not an error.
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let url = format!("{}/health", self.base_url);
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                url: url.clone(),
                source,
            })?;
        resp.json::<HealthResponse>()
            .await
            .map_err(|source| ClientError::Decode { url, source })
    }
}

async fn decode<T: serde::de::DeserializeOwned>(
    url: String,
    resp: reqwest::Response,
) -> Result<T, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        // Prefer the service's own message; fall back to the raw body.
        let text = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|b| b.message)
            .unwrap_or(text);
        return Err(ClientError::Status {
            url,
            status,
            message,
        });
    }
    resp.json::<T>()
        .await
        .map_err(|source| ClientError::Decode { url, source })
}
