//! Fixed-size batch of concurrent requests against the wish endpoints.
//!
//! Requests alternate between a submission with a random name and a full
//! listing. At most `concurrency` requests are in flight; every dispatched
//! request is counted exactly once as a success (200/201) or a failure.

use std::time::{Duration, Instant};

use reqwest::StatusCode;
use tokio::task::{JoinError, JoinSet};
use tracing::debug;
use wishes_core::NewWish;

use crate::client::WishesClient;

#[derive(Debug, Clone)]
pub struct LoadConfig {
    pub requests: usize,
    pub concurrency: usize,
    /// Wish text sent with every submission.
    pub wish: String,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            requests: 500,
            concurrency: 50,
            wish: "A bicycle".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Submit,
    List,
}

impl RequestKind {
    /// Even-numbered requests submit, odd-numbered ones list.
    pub fn for_index(i: usize) -> Self {
        if i % 2 == 0 {
            Self::Submit
        } else {
            Self::List
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadReport {
    pub succeeded: usize,
    pub failed: usize,
    pub elapsed: Duration,
}

impl LoadReport {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }

    pub fn requests_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.total() as f64 / secs
        } else {
            0.0
        }
    }
}

/// Run the batch described by `cfg` and tally the outcomes.
pub async fn run(client: &WishesClient, cfg: &LoadConfig) -> LoadReport {
    let concurrency = cfg.concurrency.max(1);
    let started = Instant::now();
    let mut tally = Tally::default();
    let mut in_flight = JoinSet::new();

    for i in 0..cfg.requests {
        if in_flight.len() >= concurrency {
            if let Some(res) = in_flight.join_next().await {
                tally.record(res);
            }
        }
        let client = client.clone();
        let wish = cfg.wish.clone();
        in_flight.spawn(async move { dispatch(&client, RequestKind::for_index(i), wish).await });
    }
    while let Some(res) = in_flight.join_next().await {
        tally.record(res);
    }

    LoadReport {
        succeeded: tally.succeeded,
        failed: tally.failed,
        elapsed: started.elapsed(),
    }
}

/// Submission name that is unique with overwhelming probability.
pub fn random_name() -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    format!("User{}", &id[..8])
}

/// Only 200 and 201 count as success; the body is never decoded.
fn is_success(status: StatusCode) -> bool {
    matches!(status, StatusCode::OK | StatusCode::CREATED)
}

async fn dispatch(client: &WishesClient, kind: RequestKind, wish: String) -> bool {
    let res = match kind {
        RequestKind::Submit => client.submit_status(&NewWish::new(random_name(), wish)).await,
        RequestKind::List => client.list_status().await,
    };
    match res {
        Ok(status) if is_success(status) => true,
        Ok(status) => {
            debug!(?kind, %status, "request failed");
            false
        }
        Err(e) => {
            debug!(?kind, error = %e, "request failed");
            false
        }
    }
}

#[derive(Default)]
struct Tally {
    succeeded: usize,
    failed: usize,
}

impl Tally {
    /// A request whose task died still counts, as a failure.
    fn record(&mut self, res: Result<bool, JoinError>) {
        match res {
            Ok(true) => self.succeeded += 1,
            Ok(false) | Err(_) => self.failed += 1,
        }
    }
}
