use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use crate::scout::domain::{
    CampaignId, CompanyId, Invitation, InvitationId, InvitationStatus, JobPostingId, StudentId,
};
use crate::scout::repository::{InvitationStore, RepositoryError};
use crate::scout::service::CampaignManager;
use crate::scout::stats::CampaignAggregator;

pub(super) fn company() -> CompanyId {
    CompanyId("company-7".to_string())
}

pub(super) fn job_posting() -> JobPostingId {
    JobPostingId("job-42".to_string())
}

pub(super) fn student(suffix: &str) -> StudentId {
    StudentId(format!("student-{suffix}"))
}

pub(super) fn recipients(suffixes: &[&str]) -> Vec<StudentId> {
    suffixes.iter().map(|s| student(s)).collect()
}

/// Mutex-backed store: the single lock makes check-and-insert and the
/// conditional transitions atomic, which is exactly what the trait demands
/// of a real database's unique constraint and conditional UPDATE.
#[derive(Default, Clone)]
pub(super) struct MemoryInvitationStore {
    inner: Arc<Mutex<MemoryInner>>,
}

#[derive(Default)]
struct MemoryInner {
    rows: HashMap<InvitationId, Invitation>,
    triples: HashSet<(CompanyId, StudentId, JobPostingId)>,
}

impl MemoryInvitationStore {
    pub(super) fn row_count(&self) -> usize {
        self.inner.lock().expect("store mutex poisoned").rows.len()
    }

    pub(super) fn get(&self, id: &InvitationId) -> Option<Invitation> {
        self.inner
            .lock()
            .expect("store mutex poisoned")
            .rows
            .get(id)
            .cloned()
    }
}

impl InvitationStore for MemoryInvitationStore {
    fn insert(&self, invitation: Invitation) -> Result<Invitation, RepositoryError> {
        let mut guard = self.inner.lock().expect("store mutex poisoned");
        if !guard.triples.insert(invitation.triple()) {
            return Err(RepositoryError::Conflict);
        }
        guard
            .rows
            .insert(invitation.id.clone(), invitation.clone());
        Ok(invitation)
    }

    fn find_by_id(&self, id: &InvitationId) -> Result<Option<Invitation>, RepositoryError> {
        let guard = self.inner.lock().expect("store mutex poisoned");
        Ok(guard.rows.get(id).cloned())
    }

    fn find_by_campaign(&self, campaign: &CampaignId) -> Result<Vec<Invitation>, RepositoryError> {
        let guard = self.inner.lock().expect("store mutex poisoned");
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
        let mut guard = self.inner.lock().expect("store mutex poisoned");
        let row = guard.rows.get_mut(id).ok_or(RepositoryError::NotFound)?;
        if row.status != InvitationStatus::Sent {
            return Ok(false);
        }
        row.status = status;
        row.responded_at = Some(responded_at);
        Ok(true)
    }

    fn delete_if_sent(&self, id: &InvitationId) -> Result<bool, RepositoryError> {
        let mut guard = self.inner.lock().expect("store mutex poisoned");
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

/// Fails inserts after a fixed number of successes, standing in for a store
/// that goes down mid-batch.
pub(super) struct FlakyInvitationStore {
    delegate: MemoryInvitationStore,
    budget: Mutex<usize>,
}

impl FlakyInvitationStore {
    pub(super) fn failing_after(successes: usize) -> (Arc<Self>, MemoryInvitationStore) {
        let delegate = MemoryInvitationStore::default();
        (
            Arc::new(Self {
                delegate: delegate.clone(),
                budget: Mutex::new(successes),
            }),
            delegate,
        )
    }
}

impl InvitationStore for FlakyInvitationStore {
    fn insert(&self, invitation: Invitation) -> Result<Invitation, RepositoryError> {
        let mut budget = self.budget.lock().expect("budget mutex poisoned");
        if *budget == 0 {
            return Err(RepositoryError::Unavailable("connection reset".to_string()));
        }
        *budget -= 1;
        self.delegate.insert(invitation)
    }

    fn find_by_id(&self, id: &InvitationId) -> Result<Option<Invitation>, RepositoryError> {
        self.delegate.find_by_id(id)
    }

    fn find_by_campaign(&self, campaign: &CampaignId) -> Result<Vec<Invitation>, RepositoryError> {
        self.delegate.find_by_campaign(campaign)
    }

    fn update_status_if_sent(
        &self,
        id: &InvitationId,
        status: InvitationStatus,
        responded_at: DateTime<Utc>,
    ) -> Result<bool, RepositoryError> {
        self.delegate.update_status_if_sent(id, status, responded_at)
    }

    fn delete_if_sent(&self, id: &InvitationId) -> Result<bool, RepositoryError> {
        self.delegate.delete_if_sent(id)
    }
}

pub(super) fn build_manager() -> (CampaignManager<MemoryInvitationStore>, MemoryInvitationStore) {
    let store = MemoryInvitationStore::default();
    (CampaignManager::new(Arc::new(store.clone())), store)
}

pub(super) fn build_aggregator(
    store: &MemoryInvitationStore,
) -> CampaignAggregator<MemoryInvitationStore> {
    CampaignAggregator::new(Arc::new(store.clone()))
}
