//! Keep-running policy for unexpected faults.
//!
//! A panic or error in a request handler or background task is logged and
//! the process carries on serving. Nothing here restarts a failed task.

use std::any::Any;
use std::convert::Infallible;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::service::{Health, WishService};
use crate::store::WishStore;

/// Route panics through `tracing` instead of stderr.
///
/// Tokio already contains a panic to the task it happened in; this makes sure
/// it lands in the same log as everything else.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_else(|| "<unknown>".to_string());
        error!(panic = %panic_message(info.payload()), %location, "unexpected panic");
    }));
}

/// Best-effort text of a panic payload.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Spawn `fut` and log, rather than propagate, its error or panic.
pub fn spawn_supervised<F, E>(name: &'static str, fut: F) -> JoinHandle<()>
where
    F: Future<Output = Result<(), E>> + Send + 'static,
    E: Display + Send + 'static,
{
    let task = tokio::spawn(fut);
    tokio::spawn(async move {
        match task.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => error!(task = name, error = %e, "background task failed"),
            Err(e) if e.is_panic() => {
                error!(task = name, panic = %panic_message(e.into_panic().as_ref()), "background task panicked")
            }
            Err(e) => warn!(task = name, error = %e, "background task cancelled"),
        }
    })
}

/// Periodically probe the store and log when it goes away or comes back.
pub fn spawn_store_watch<S>(svc: WishService<S>, every: Duration) -> JoinHandle<()>
where
    S: WishStore + Clone,
{
    spawn_supervised("store-watch", watch_store(svc, every))
}

async fn watch_store<S: WishStore>(svc: WishService<S>, every: Duration) -> Result<(), Infallible> {
    let mut interval = tokio::time::interval(every);
    let mut last = Health::Ok;
    loop {
        interval.tick().await;
        let now = svc.health_check().await;
        match (&last, &now) {
            (Health::Ok, Health::Unavailable(cause)) => warn!(cause = %cause, "store became unreachable"),
            (Health::Unavailable(_), Health::Ok) => info!("store reachable again"),
            _ => {}
        }
        last = now;
    }
}
