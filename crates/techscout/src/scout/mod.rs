//! Scout invitation campaigns: bulk fan-out, per-recipient response
//! tracking, and derived campaign statistics.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;
pub mod stats;

#[cfg(test)]
mod tests;

pub use domain::{
    CampaignId, CompanyId, Invitation, InvitationId, InvitationStatus, JobPostingId, ScoutDecision,
    StudentId,
};
pub use repository::{InvitationStore, RepositoryError};
pub use router::{scout_router, ScoutState};
pub use service::{BulkSendReport, CampaignManager, ScoutError, SkipReason, SkippedRecipient};
pub use stats::{CampaignAggregator, CampaignStats};
