use std::any::Any;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use wishes_core::api::{ErrorBody, HealthResponse};
use wishes_core::{NewWish, ValidationError, WishRecord};

use crate::service::{Health, ServiceError, WishService};
use crate::store::WishStore;

#[derive(Clone)]
pub struct AppState<S> {
    svc: WishService<S>,
}

/// Builds the HTTP surface: wish endpoints, health probe, and the CORS,
/// access-log and panic-catching layers.
pub fn router<S>(svc: WishService<S>) -> Router
where
    S: WishStore + Clone,
{
    let state = AppState { svc };
    Router::new()
        .route("/api/wishes", get(list_wishes::<S>).post(submit_wish::<S>))
        .route("/health", get(health::<S>))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn submit_wish<S: WishStore + Clone>(
    State(st): State<AppState<S>>,
    body: Result<Json<NewWish>, JsonRejection>,
) -> Result<(StatusCode, Json<WishRecord>), ServiceError> {
    // An unreadable body is reported like a body without the required fields.
    let Json(req) = body.map_err(|rej| {
        tracing::error!(error = %rej.body_text(), "POST /api/wishes - unreadable body");
        ValidationError::Malformed(rej.body_text())
    })?;
    let record = st.svc.submit(req).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn list_wishes<S: WishStore + Clone>(
    State(st): State<AppState<S>>,
) -> Result<Json<Vec<WishRecord>>, ServiceError> {
    Ok(Json(st.svc.list_all().await?))
}

async fn health<S: WishStore + Clone>(
    State(st): State<AppState<S>>,
) -> (StatusCode, Json<HealthResponse>) {
    match st.svc.health_check().await {
        Health::Ok => (StatusCode::OK, Json(HealthResponse::ok())),
        Health::Unavailable(cause) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(HealthResponse::fail(cause)),
        ),
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::Save(_) | ServiceError::Load(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(ErrorBody::new(self.to_string()))).into_response()
    }
}

/// The panic itself is already logged by the process panic hook.
fn panic_response(_err: Box<dyn Any + Send + 'static>) -> Response {
    let body = ErrorBody::new("Internal server error.");
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}
