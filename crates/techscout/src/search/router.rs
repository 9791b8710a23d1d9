use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{MatchQuery, Pagination};
use super::engine::{CandidateStore, SearchEngine, SearchError, SearchLog};

#[derive(Debug, Deserialize)]
pub(crate) struct SearchRequest {
    #[serde(flatten)]
    query: MatchQuery,
    #[serde(default)]
    page: Pagination,
}

/// Router builder exposing the technology search endpoints.
pub fn search_router<S, L>(engine: Arc<SearchEngine<S, L>>) -> Router
where
    S: CandidateStore + 'static,
    L: SearchLog + 'static,
{
    Router::new()
        .route("/api/v1/search/companies", post(companies_handler::<S, L>))
        .route("/api/v1/search/jobs", post(jobs_handler::<S, L>))
        .with_state(engine)
}

pub(crate) async fn companies_handler<S, L>(
    State(engine): State<Arc<SearchEngine<S, L>>>,
    axum::Json(request): axum::Json<SearchRequest>,
) -> Response
where
    S: CandidateStore + 'static,
    L: SearchLog + 'static,
{
    to_response(engine.search_companies(&request.query, request.page))
}

pub(crate) async fn jobs_handler<S, L>(
    State(engine): State<Arc<SearchEngine<S, L>>>,
    axum::Json(request): axum::Json<SearchRequest>,
) -> Response
where
    S: CandidateStore + 'static,
    L: SearchLog + 'static,
{
    to_response(engine.search_jobs(&request.query, request.page))
}

fn to_response(result: Result<super::domain::SearchPage, SearchError>) -> Response {
    match result {
        Ok(page) => (StatusCode::OK, axum::Json(page)).into_response(),
        Err(SearchError::Query(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(SearchError::Store(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
