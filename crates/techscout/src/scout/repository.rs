use chrono::{DateTime, Utc};

use super::domain::{CampaignId, Invitation, InvitationId, InvitationStatus};

/// Storage abstraction for invitation rows.
///
/// The two conditional operations are the concurrency guard for the
/// `sent -> terminal` state machine: implementations must evaluate the
/// status check and the mutation as one atomic unit, so a concurrent cancel
/// and response cannot both win. Likewise `insert` must rely on the store's
/// unique (company, student, job_posting) constraint rather than a separate
/// read, so overlapping bulk sends stay correct.
pub trait InvitationStore: Send + Sync {
    fn insert(&self, invitation: Invitation) -> Result<Invitation, RepositoryError>;
    fn find_by_id(&self, id: &InvitationId) -> Result<Option<Invitation>, RepositoryError>;
    fn find_by_campaign(&self, campaign: &CampaignId) -> Result<Vec<Invitation>, RepositoryError>;

    /// Transition to `status` only if the row is still `Sent`. Returns
    /// `false` when the precondition failed.
    fn update_status_if_sent(
        &self,
        id: &InvitationId,
        status: InvitationStatus,
        responded_at: DateTime<Utc>,
    ) -> Result<bool, RepositoryError>;

    /// Delete the row only if it is still `Sent`. Returns `false` when the
    /// precondition failed.
    fn delete_if_sent(&self, id: &InvitationId) -> Result<bool, RepositoryError>;
}

/// Error enumeration for invitation storage failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("invitation already exists")]
    Conflict,
    #[error("invitation not found")]
    NotFound,
    #[error("invitation store unavailable: {0}")]
    Unavailable(String),
}
