use std::collections::{HashMap, HashSet};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use tracing::info;

use techscout::scout::{
    CampaignId, CompanyId, Invitation, InvitationId, InvitationStatus, InvitationStore,
    JobPostingId, RepositoryError, StudentId,
};
use techscout::search::{
    Candidate, CandidateStore, CandidateStoreError, MatchQuery, SearchLog, SearchLogError,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Single-mutex invitation store. Holding one lock across the uniqueness
/// check and the mutation gives the same atomicity a relational unique
/// constraint and conditional UPDATE would.
#[derive(Default, Clone)]
pub(crate) struct InMemoryInvitationStore {
    inner: Arc<Mutex<InvitationRows>>,
}

#[derive(Default)]
struct InvitationRows {
    rows: HashMap<InvitationId, Invitation>,
    triples: HashSet<(CompanyId, StudentId, JobPostingId)>,
}

impl InvitationStore for InMemoryInvitationStore {
    fn insert(&self, invitation: Invitation) -> Result<Invitation, RepositoryError> {
        let mut guard = self.inner.lock().expect("invitation mutex poisoned");
        if !guard.triples.insert(invitation.triple()) {
            return Err(RepositoryError::Conflict);
        }
        guard.rows.insert(invitation.id.clone(), invitation.clone());
        Ok(invitation)
    }

    fn find_by_id(&self, id: &InvitationId) -> Result<Option<Invitation>, RepositoryError> {
        let guard = self.inner.lock().expect("invitation mutex poisoned");
        Ok(guard.rows.get(id).cloned())
    }

    fn find_by_campaign(&self, campaign: &CampaignId) -> Result<Vec<Invitation>, RepositoryError> {
        let guard = self.inner.lock().expect("invitation mutex poisoned");
        Ok(guard
            .rows
            .values()
            .filter(|invitation| invitation.campaign.as_ref() == Some(campaign))
            .cloned()
            .collect())
    }

    fn update_status_if_sent(
        &self,
        id: &InvitationId,
        status: InvitationStatus,
        responded_at: DateTime<Utc>,
    ) -> Result<bool, RepositoryError> {
        let mut guard = self.inner.lock().expect("invitation mutex poisoned");
        let row = guard.rows.get_mut(id).ok_or(RepositoryError::NotFound)?;
        if row.status != InvitationStatus::Sent {
            return Ok(false);
        }
        row.status = status;
        row.responded_at = Some(responded_at);
        Ok(true)
    }

    fn delete_if_sent(&self, id: &InvitationId) -> Result<bool, RepositoryError> {
        let mut guard = self.inner.lock().expect("invitation mutex poisoned");
        let row = guard.rows.get(id).ok_or(RepositoryError::NotFound)?;
        if row.status != InvitationStatus::Sent {
            return Ok(false);
        }
        let triple = row.triple();
        guard.rows.remove(id);
        guard.triples.remove(&triple);
        Ok(true)
    }
}

/// Fixed candidate sets loaded at startup.
#[derive(Default, Clone)]
pub(crate) struct InMemoryCandidateStore {
    pub(crate) companies: Vec<Candidate>,
    pub(crate) jobs: Vec<Candidate>,
}

impl CandidateStore for InMemoryCandidateStore {
    fn list_active_companies(&self) -> Result<Vec<Candidate>, CandidateStoreError> {
        Ok(self.companies.clone())
    }

    fn list_active_jobs(&self) -> Result<Vec<Candidate>, CandidateStoreError> {
        Ok(self.jobs.clone())
    }
}

/// Search log backed by the tracing pipeline.
#[derive(Default, Clone)]
pub(crate) struct TracingSearchLog;

impl SearchLog for TracingSearchLog {
    fn record(&self, query: &MatchQuery, result_count: usize) -> Result<(), SearchLogError> {
        info!(
            required = query.required.len(),
            preferred = query.preferred.len(),
            excluded = query.excluded.len(),
            min_score = query.min_score,
            result_count,
            "technology search"
        );
        Ok(())
    }
}
