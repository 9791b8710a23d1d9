use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::domain::{
    CampaignId, CompanyId, Invitation, InvitationId, InvitationStatus, JobPostingId, ScoutDecision,
    StudentId,
};
use super::repository::{InvitationStore, RepositoryError};

static INVITATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_invitation_id() -> InvitationId {
    let id = INVITATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    InvitationId(format!("inv-{id:06}"))
}

fn new_campaign_id() -> CampaignId {
    CampaignId(Uuid::new_v4().to_string())
}

/// Why a recipient was left out of a bulk send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    DuplicateInvitation,
}

/// One recipient skipped during a bulk send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRecipient {
    pub student: StudentId,
    pub reason: SkipReason,
}

/// Outcome of a bulk send: what was created, what was skipped, and the
/// campaign id stamped on every created row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkSendReport {
    pub campaign: CampaignId,
    pub created: Vec<Invitation>,
    pub skipped: Vec<SkippedRecipient>,
}

impl BulkSendReport {
    pub fn created_count(&self) -> usize {
        self.created.len()
    }
}

/// Errors raised by campaign operations.
#[derive(Debug, thiserror::Error)]
pub enum ScoutError {
    #[error("an invitation for this student and job posting already exists")]
    DuplicateInvitation,
    #[error("invitation not found")]
    InvitationNotFound,
    #[error("no invitations recorded for campaign '{0}'")]
    CampaignNotFound(CampaignId),
    #[error("only the invited student may respond to this invitation")]
    ResponderNotAuthorized,
    #[error("only the inviting company may cancel this invitation")]
    SenderNotAuthorized,
    #[error("invitation has already been responded to")]
    AlreadyResponded,
    #[error("a responded invitation cannot be cancelled")]
    CannotCancelResponded,
    #[error(transparent)]
    Repository(RepositoryError),
}

/// Creates invitations (individually or as campaigns) and applies the
/// `sent -> terminal` transitions on behalf of recipients and senders.
pub struct CampaignManager<R> {
    store: Arc<R>,
}

impl<R> CampaignManager<R>
where
    R: InvitationStore + 'static,
{
    pub fn new(store: Arc<R>) -> Self {
        Self { store }
    }

    /// Send a single, non-campaign invitation. A duplicate
    /// (company, student, job_posting) triple fails outright.
    pub fn create_individual(
        &self,
        company: CompanyId,
        student: StudentId,
        job_posting: JobPostingId,
        message: String,
    ) -> Result<Invitation, ScoutError> {
        let invitation = build_invitation(company, student, job_posting, message, None, None);
        match self.store.insert(invitation) {
            Ok(stored) => Ok(stored),
            Err(RepositoryError::Conflict) => Err(ScoutError::DuplicateInvitation),
            Err(other) => Err(ScoutError::Repository(other)),
        }
    }

    /// Fan an invitation out to many students under one fresh campaign id.
    ///
    /// Recipients are processed independently: a duplicate for one student
    /// is recorded in `skipped` and the batch continues. A store outage is
    /// the only thing that aborts the remaining batch; rows created before
    /// the outage stay persisted.
    pub fn create_bulk(
        &self,
        company: CompanyId,
        recipients: &[StudentId],
        job_posting: JobPostingId,
        message: String,
        template: Option<String>,
    ) -> Result<BulkSendReport, ScoutError> {
        let campaign = new_campaign_id();
        let mut created = Vec::new();
        let mut skipped = Vec::new();

        for student in recipients {
            let invitation = build_invitation(
                company.clone(),
                student.clone(),
                job_posting.clone(),
                message.clone(),
                Some(campaign.clone()),
                template.clone(),
            );
            match self.store.insert(invitation) {
                Ok(stored) => created.push(stored),
                Err(RepositoryError::Conflict) => skipped.push(SkippedRecipient {
                    student: student.clone(),
                    reason: SkipReason::DuplicateInvitation,
                }),
                Err(other) => return Err(ScoutError::Repository(other)),
            }
        }

        info!(
            campaign = %campaign,
            created = created.len(),
            skipped = skipped.len(),
            "scout campaign sent"
        );

        Ok(BulkSendReport {
            campaign,
            created,
            skipped,
        })
    }

    /// Apply a student's accept/reject decision. The conditional update in
    /// the store is what actually enforces the `sent`-only transition, so a
    /// response racing a cancel loses cleanly instead of overwriting.
    pub fn respond(
        &self,
        id: &InvitationId,
        responder: &StudentId,
        decision: ScoutDecision,
    ) -> Result<Invitation, ScoutError> {
        let mut invitation = self.fetch(id)?;
        if invitation.student != *responder {
            return Err(ScoutError::ResponderNotAuthorized);
        }

        self.transition(&mut invitation, decision.status())
            .map_err(|err| match err {
                TransitionFailed::Precondition => ScoutError::AlreadyResponded,
                TransitionFailed::Store(inner) => ScoutError::Repository(inner),
            })?;
        Ok(invitation)
    }

    /// Apply the time-based expiry sweep's transition. Scheduling the sweep
    /// is the host's concern; the same `sent`-only guard applies here.
    pub fn expire(&self, id: &InvitationId) -> Result<Invitation, ScoutError> {
        let mut invitation = self.fetch(id)?;
        self.transition(&mut invitation, InvitationStatus::Expired)
            .map_err(|err| match err {
                TransitionFailed::Precondition => ScoutError::AlreadyResponded,
                TransitionFailed::Store(inner) => ScoutError::Repository(inner),
            })?;
        Ok(invitation)
    }

    /// Sender-initiated deletion, legal only while the row is still `Sent`.
    pub fn cancel(&self, id: &InvitationId, sender: &CompanyId) -> Result<(), ScoutError> {
        let invitation = self.fetch(id)?;
        if invitation.company != *sender {
            return Err(ScoutError::SenderNotAuthorized);
        }

        let deleted = self
            .store
            .delete_if_sent(id)
            .map_err(ScoutError::Repository)?;
        if !deleted {
            return Err(ScoutError::CannotCancelResponded);
        }
        Ok(())
    }

    fn fetch(&self, id: &InvitationId) -> Result<Invitation, ScoutError> {
        self.store
            .find_by_id(id)
            .map_err(ScoutError::Repository)?
            .ok_or(ScoutError::InvitationNotFound)
    }

    fn transition(
        &self,
        invitation: &mut Invitation,
        status: InvitationStatus,
    ) -> Result<(), TransitionFailed> {
        let responded_at = Utc::now();
        let updated = self
            .store
            .update_status_if_sent(&invitation.id, status, responded_at)
            .map_err(TransitionFailed::Store)?;
        if !updated {
            return Err(TransitionFailed::Precondition);
        }
        invitation.status = status;
        invitation.responded_at = Some(responded_at);
        Ok(())
    }
}

enum TransitionFailed {
    Precondition,
    Store(RepositoryError),
}

fn build_invitation(
    company: CompanyId,
    student: StudentId,
    job_posting: JobPostingId,
    message: String,
    campaign: Option<CampaignId>,
    template: Option<String>,
) -> Invitation {
    Invitation {
        id: next_invitation_id(),
        company,
        student,
        job_posting,
        campaign,
        message,
        template,
        status: InvitationStatus::Sent,
        sent_at: Utc::now(),
        responded_at: None,
    }
}
