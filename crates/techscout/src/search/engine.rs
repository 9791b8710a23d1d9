use std::sync::Arc;

use rayon::prelude::*;
use tracing::warn;

use crate::catalog::TechnologyCatalog;

use super::domain::{
    Candidate, MatchQuery, MatchResult, PageMeta, Pagination, QueryError, SearchPage,
};
use super::scorer::{MatchScorer, ScoringWeights};

/// Data-access seam for scoreable candidates. Implementations are expected
/// to apply their own timeouts; the engine never retries a fetch.
pub trait CandidateStore: Send + Sync {
    fn list_active_companies(&self) -> Result<Vec<Candidate>, CandidateStoreError>;
    fn list_active_jobs(&self) -> Result<Vec<Candidate>, CandidateStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CandidateStoreError {
    #[error("candidate store unavailable: {0}")]
    Unavailable(String),
}

/// Fire-and-forget query log. A failed write is demoted to a warning and
/// never fails the search.
pub trait SearchLog: Send + Sync {
    fn record(&self, query: &MatchQuery, result_count: usize) -> Result<(), SearchLogError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SearchLogError {
    #[error("search log transport unavailable: {0}")]
    Transport(String),
}

/// Errors a search can surface to the caller.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error(transparent)]
    Store(#[from] CandidateStoreError),
}

/// Orchestrates scoring across a candidate collection: validate, fetch,
/// score, filter, rank, paginate.
pub struct SearchEngine<S, L> {
    store: Arc<S>,
    log: Arc<L>,
    scorer: MatchScorer,
    catalog: Arc<TechnologyCatalog>,
}

impl<S, L> SearchEngine<S, L>
where
    S: CandidateStore + 'static,
    L: SearchLog + 'static,
{
    pub fn new(
        store: Arc<S>,
        log: Arc<L>,
        catalog: Arc<TechnologyCatalog>,
        weights: ScoringWeights,
    ) -> Self {
        Self {
            store,
            log,
            scorer: MatchScorer::new(weights),
            catalog,
        }
    }

    pub fn search_companies(
        &self,
        query: &MatchQuery,
        page: Pagination,
    ) -> Result<SearchPage, SearchError> {
        query.validate()?;
        let candidates = self.store.list_active_companies()?;
        Ok(self.rank(query, candidates, page))
    }

    pub fn search_jobs(
        &self,
        query: &MatchQuery,
        page: Pagination,
    ) -> Result<SearchPage, SearchError> {
        query.validate()?;
        let candidates = self.store.list_active_jobs()?;
        Ok(self.rank(query, candidates, page))
    }

    /// Score, filter, and order a candidate set.
    ///
    /// Scoring runs in parallel: each candidate depends only on its own
    /// associations plus the shared read-only query and catalog. Results are
    /// collected first and sorted once so the ordering never depends on
    /// completion order. Ties break on candidate id ascending, which keeps
    /// repeated identical queries byte-for-byte stable.
    fn rank(&self, query: &MatchQuery, candidates: Vec<Candidate>, page: Pagination) -> SearchPage {
        let mut scored: Vec<MatchResult> = candidates
            .into_par_iter()
            .filter(|candidate| query.filters.matches(&candidate.metadata))
            .filter_map(|candidate| {
                self.scorer
                    .score(query, &candidate.associations, &self.catalog)
                    .map(|outcome| MatchResult {
                        candidate: candidate.id,
                        score: outcome.score,
                        matched_required: outcome.matched_required,
                        matched_preferred: outcome.matched_preferred,
                    })
            })
            .filter(|result| result.score >= query.min_score)
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.candidate.cmp(&b.candidate))
        });

        let total = scored.len();
        if let Err(err) = self.log.record(query, total) {
            warn!(error = %err, "search log write failed");
        }

        let per_page = page.per_page.max(1);
        let current = page.page.max(1);
        let start = (current - 1).saturating_mul(per_page);
        let results = if start >= total {
            Vec::new()
        } else {
            scored[start..(start + per_page).min(total)].to_vec()
        };

        SearchPage {
            results,
            meta: PageMeta {
                total,
                page: current,
                per_page,
            },
        }
    }
}
