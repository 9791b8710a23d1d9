use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{CampaignId, CompanyId, InvitationId, JobPostingId, ScoutDecision, StudentId};
use super::repository::{InvitationStore, RepositoryError};
use super::service::{CampaignManager, ScoutError, SkippedRecipient};
use super::stats::CampaignAggregator;

/// Shared handler state: the manager and the aggregator over one store.
pub struct ScoutState<R> {
    pub manager: CampaignManager<R>,
    pub aggregator: CampaignAggregator<R>,
}

impl<R> ScoutState<R>
where
    R: InvitationStore + 'static,
{
    pub fn new(store: Arc<R>) -> Self {
        Self {
            manager: CampaignManager::new(store.clone()),
            aggregator: CampaignAggregator::new(store),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct IndividualInvitationRequest {
    company: CompanyId,
    student: StudentId,
    job_posting: JobPostingId,
    message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BulkCampaignRequest {
    company: CompanyId,
    recipients: Vec<StudentId>,
    job_posting: JobPostingId,
    message: String,
    #[serde(default)]
    template: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct BulkCampaignResponse {
    campaign_id: CampaignId,
    created_count: usize,
    skipped: Vec<SkippedRecipient>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RespondRequest {
    student: StudentId,
    decision: ScoutDecision,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CancelRequest {
    company: CompanyId,
}

/// Router builder exposing the scout campaign endpoints.
pub fn scout_router<R>(state: Arc<ScoutState<R>>) -> Router
where
    R: InvitationStore + 'static,
{
    Router::new()
        .route("/api/v1/scout/invitations", post(create_individual_handler::<R>))
        .route("/api/v1/scout/campaigns", post(create_bulk_handler::<R>))
        .route(
            "/api/v1/scout/invitations/:invitation_id/response",
            post(respond_handler::<R>),
        )
        .route(
            "/api/v1/scout/invitations/:invitation_id/cancel",
            post(cancel_handler::<R>),
        )
        .route(
            "/api/v1/scout/campaigns/:campaign_id/stats",
            get(stats_handler::<R>),
        )
        .with_state(state)
}

pub(crate) async fn create_individual_handler<R>(
    State(state): State<Arc<ScoutState<R>>>,
    axum::Json(request): axum::Json<IndividualInvitationRequest>,
) -> Response
where
    R: InvitationStore + 'static,
{
    match state.manager.create_individual(
        request.company,
        request.student,
        request.job_posting,
        request.message,
    ) {
        Ok(invitation) => (StatusCode::CREATED, axum::Json(invitation)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn create_bulk_handler<R>(
    State(state): State<Arc<ScoutState<R>>>,
    axum::Json(request): axum::Json<BulkCampaignRequest>,
) -> Response
where
    R: InvitationStore + 'static,
{
    match state.manager.create_bulk(
        request.company,
        &request.recipients,
        request.job_posting,
        request.message,
        request.template,
    ) {
        Ok(report) => {
            let body = BulkCampaignResponse {
                campaign_id: report.campaign.clone(),
                created_count: report.created_count(),
                skipped: report.skipped,
            };
            (StatusCode::CREATED, axum::Json(body)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn respond_handler<R>(
    State(state): State<Arc<ScoutState<R>>>,
    Path(invitation_id): Path<String>,
    axum::Json(request): axum::Json<RespondRequest>,
) -> Response
where
    R: InvitationStore + 'static,
{
    let id = InvitationId(invitation_id);
    match state.manager.respond(&id, &request.student, request.decision) {
        Ok(invitation) => (StatusCode::OK, axum::Json(invitation)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn cancel_handler<R>(
    State(state): State<Arc<ScoutState<R>>>,
    Path(invitation_id): Path<String>,
    axum::Json(request): axum::Json<CancelRequest>,
) -> Response
where
    R: InvitationStore + 'static,
{
    let id = InvitationId(invitation_id);
    match state.manager.cancel(&id, &request.company) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn stats_handler<R>(
    State(state): State<Arc<ScoutState<R>>>,
    Path(campaign_id): Path<String>,
) -> Response
where
    R: InvitationStore + 'static,
{
    let id = CampaignId(campaign_id);
    match state.aggregator.stats(&id) {
        Ok(stats) => (StatusCode::OK, axum::Json(stats)).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: ScoutError) -> Response {
    let status = match &err {
        ScoutError::DuplicateInvitation => StatusCode::CONFLICT,
        ScoutError::InvitationNotFound | ScoutError::CampaignNotFound(_) => StatusCode::NOT_FOUND,
        ScoutError::ResponderNotAuthorized | ScoutError::SenderNotAuthorized => {
            StatusCode::FORBIDDEN
        }
        ScoutError::AlreadyResponded | ScoutError::CannotCancelResponded => StatusCode::CONFLICT,
        ScoutError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ScoutError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let body = json!({ "error": err.to_string() });
    (status, axum::Json(body)).into_response()
}
