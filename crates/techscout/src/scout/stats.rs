use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::domain::{CampaignId, InvitationStatus};
use super::repository::InvitationStore;
use super::service::ScoutError;

/// Aggregate view over one campaign's invitation rows. Derived, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignStats {
    pub campaign: CampaignId,
    pub total_sent: usize,
    pub pending: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub expired: usize,
    /// `accepted / (accepted + rejected)` as a percentage; 0 while nobody
    /// has responded either way.
    pub acceptance_rate: f32,
}

/// Computes campaign statistics on demand.
///
/// Recipients respond asynchronously and independently of campaign
/// creation, so every call re-reads the rows; nothing here is cached.
pub struct CampaignAggregator<R> {
    store: Arc<R>,
}

impl<R> CampaignAggregator<R>
where
    R: InvitationStore + 'static,
{
    pub fn new(store: Arc<R>) -> Self {
        Self { store }
    }

    pub fn stats(&self, campaign: &CampaignId) -> Result<CampaignStats, ScoutError> {
        let rows = self
            .store
            .find_by_campaign(campaign)
            .map_err(ScoutError::Repository)?;
        if rows.is_empty() {
            return Err(ScoutError::CampaignNotFound(campaign.clone()));
        }

        let mut pending = 0;
        let mut accepted = 0;
        let mut rejected = 0;
        let mut expired = 0;
        for invitation in &rows {
            match invitation.status {
                InvitationStatus::Sent => pending += 1,
                InvitationStatus::Accepted => accepted += 1,
                InvitationStatus::Rejected => rejected += 1,
                InvitationStatus::Expired => expired += 1,
            }
        }

        let responded = accepted + rejected;
        let acceptance_rate = if responded > 0 {
            accepted as f32 / responded as f32 * 100.0
        } else {
            0.0
        };

        Ok(CampaignStats {
            campaign: campaign.clone(),
            total_sent: rows.len(),
            pending,
            accepted,
            rejected,
            expired,
            acceptance_rate,
        })
    }
}
