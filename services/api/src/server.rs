use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use tracing::info;

use techscout::config::AppConfig;
use techscout::error::AppError;
use techscout::scout::ScoutState;
use techscout::search::SearchEngine;
use techscout::telemetry;

use crate::cli::ServeArgs;
use crate::demo::{seed_candidates, seed_catalog};
use crate::infra::{AppState, InMemoryInvitationStore, TracingSearchLog};
use crate::routes::app_router;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let engine = Arc::new(SearchEngine::new(
        Arc::new(seed_candidates()),
        Arc::new(TracingSearchLog),
        Arc::new(seed_catalog()),
        config.matching.weights,
    ));
    let scout = Arc::new(ScoutState::new(Arc::new(InMemoryInvitationStore::default())));

    let app = app_router(engine, scout)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "technology match and scout engine ready");

    axum::serve(listener, app).await?;
    Ok(())
}
