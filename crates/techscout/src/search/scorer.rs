use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::{TechId, TechnologyCatalog};

use super::domain::{MatchQuery, SearchMode, TechAssociation};

/// Weighting scheme for the compatibility score. The required-set portion
/// and the preferred-set bonus must sum to 100 so the final score stays on
/// the 0–100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    base: f32,
    bonus: f32,
}

impl ScoringWeights {
    pub fn new(base: f32, bonus: f32) -> Result<Self, WeightsError> {
        if base < 0.0 || bonus < 0.0 || (base + bonus - 100.0).abs() > 1e-3 {
            return Err(WeightsError { base, bonus });
        }
        Ok(Self { base, bonus })
    }

    pub fn base(&self) -> f32 {
        self.base
    }

    pub fn bonus(&self) -> f32 {
        self.bonus
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            base: 60.0,
            bonus: 40.0,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
#[error("scoring weights must be non-negative and sum to 100 (got base {base}, bonus {bonus})")]
pub struct WeightsError {
    pub base: f32,
    pub bonus: f32,
}

/// The technology portion of a candidate's score, before ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchScore {
    pub score: f32,
    pub matched_required: Vec<TechId>,
    pub matched_preferred: Vec<TechId>,
}

/// Pure compatibility scorer.
///
/// Scoring is a function of the query, the candidate's associations, and the
/// catalog snapshot alone; identical inputs always produce identical output,
/// so a score is never worth retrying.
#[derive(Debug, Clone)]
pub struct MatchScorer {
    weights: ScoringWeights,
}

impl MatchScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> ScoringWeights {
        self.weights
    }

    /// Score one candidate. `None` means the candidate is disqualified
    /// outright (excluded technology present, or the required set is not
    /// satisfied under the query's mode) rather than merely low-scoring.
    pub fn score(
        &self,
        query: &MatchQuery,
        associations: &[TechAssociation],
        catalog: &TechnologyCatalog,
    ) -> Option<MatchScore> {
        let owned: BTreeSet<&TechId> = associations.iter().map(|a| &a.technology).collect();

        if query.excluded.iter().any(|id| owned.contains(id)) {
            return None;
        }

        let matched_required: Vec<TechId> = query
            .required
            .iter()
            .filter(|id| owned.contains(*id))
            .cloned()
            .collect();

        if !query.required.is_empty() {
            let satisfied = match query.mode {
                SearchMode::And => matched_required.len() == query.required.len(),
                SearchMode::Or => !matched_required.is_empty(),
            };
            if !satisfied {
                return None;
            }
        }

        let matched_preferred: Vec<TechId> = query
            .preferred
            .iter()
            .filter(|id| owned.contains(*id))
            .cloned()
            .collect();

        let score = if query.is_browse() {
            self.browse_score(associations, catalog)
        } else {
            let base = ratio(matched_required.len(), query.required.len()) * self.weights.base;
            let bonus = ratio(matched_preferred.len(), query.preferred.len()) * self.weights.bonus;
            base + bonus
        };

        Some(MatchScore {
            score: score.clamp(0.0, 100.0),
            matched_required,
            matched_preferred,
        })
    }

    /// Fallback for open-ended browsing: rank by the catalog popularity of
    /// the candidate's flagship technologies, normalized from the catalog's
    /// 0–10 scale to 0–100. No flagship technologies means no signal.
    fn browse_score(
        &self,
        associations: &[TechAssociation],
        catalog: &TechnologyCatalog,
    ) -> f32 {
        let flagship: Vec<TechId> = associations
            .iter()
            .filter(|a| a.level.is_flagship())
            .map(|a| a.technology.clone())
            .collect();

        let known = catalog.list_by_ids(&flagship);
        if known.is_empty() {
            return 0.0;
        }

        let sum: f32 = known.iter().map(|t| t.popularity_score).sum();
        (sum / known.len() as f32) * 10.0
    }
}

fn ratio(matched: usize, requested: usize) -> f32 {
    matched as f32 / requested.max(1) as f32
}
