use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde_json::json;

use techscout::scout::{scout_router, InvitationStore, ScoutState};
use techscout::search::{search_router, CandidateStore, SearchEngine, SearchLog};

use crate::infra::AppState;

/// Compose the feature routers from the core crate with the operational
/// endpoints owned by the service.
pub(crate) fn app_router<S, L, R>(
    engine: Arc<SearchEngine<S, L>>,
    scout: Arc<ScoutState<R>>,
) -> Router
where
    S: CandidateStore + 'static,
    L: SearchLog + 'static,
    R: InvitationStore + 'static,
{
    search_router(engine)
        .merge(scout_router(scout))
        .route("/healthz", get(health_handler))
        .route("/metrics", get(metrics_handler))
}

pub(crate) async fn health_handler(
    Extension(state): Extension<AppState>,
) -> axum::response::Response {
    if state.readiness.load(Ordering::Acquire) {
        (StatusCode::OK, Json(json!({ "status": "ok" }))).into_response()
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "starting" })),
        )
            .into_response()
    }
}

pub(crate) async fn metrics_handler(Extension(state): Extension<AppState>) -> String {
    state.metrics.render()
}
