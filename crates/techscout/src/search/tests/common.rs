use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use crate::catalog::{TechCategory, TechId, Technology, TechnologyCatalog};
use crate::search::domain::{
    Candidate, CandidateFilters, CandidateId, CandidateMetadata, MatchQuery, SearchMode,
    TechAssociation, UsageLevel,
};
use crate::search::engine::{
    CandidateStore, CandidateStoreError, SearchEngine, SearchLog, SearchLogError,
};
use crate::search::scorer::{MatchScorer, ScoringWeights};

pub(super) fn technology(id: &str, category: TechCategory, popularity: f32) -> Technology {
    Technology {
        id: TechId::from(id),
        category,
        popularity_score: popularity,
        market_demand_score: popularity,
        learning_difficulty: 3,
    }
}

pub(super) fn catalog() -> TechnologyCatalog {
    TechnologyCatalog::from_technologies(vec![
        technology("go", TechCategory::Backend, 7.8),
        technology("rust", TechCategory::Backend, 8.4),
        technology("postgresql", TechCategory::Database, 8.2),
        technology("kubernetes", TechCategory::Devops, 8.0),
        technology("react", TechCategory::Frontend, 9.0),
        technology("php", TechCategory::Backend, 5.0),
    ])
}

pub(super) fn tech_set(ids: &[&str]) -> BTreeSet<TechId> {
    ids.iter().map(|id| TechId::from(*id)).collect()
}

pub(super) fn usage_profile(ids: &[&str]) -> Vec<TechAssociation> {
    ids.iter()
        .map(|id| TechAssociation::usage(*id, UsageLevel::Sub, false))
        .collect()
}

pub(super) fn query(required: &[&str], preferred: &[&str], mode: SearchMode) -> MatchQuery {
    MatchQuery {
        required: tech_set(required),
        preferred: tech_set(preferred),
        excluded: BTreeSet::new(),
        mode,
        min_score: 0.0,
        filters: CandidateFilters::default(),
    }
}

pub(super) fn candidate(id: &str, techs: &[&str]) -> Candidate {
    Candidate {
        id: CandidateId::from(id),
        associations: usage_profile(techs),
        metadata: CandidateMetadata::default(),
    }
}

pub(super) fn scorer() -> MatchScorer {
    MatchScorer::new(ScoringWeights::default())
}

#[derive(Default, Clone)]
pub(super) struct MemoryCandidateStore {
    pub(super) companies: Vec<Candidate>,
    pub(super) jobs: Vec<Candidate>,
}

impl CandidateStore for MemoryCandidateStore {
    fn list_active_companies(&self) -> Result<Vec<Candidate>, CandidateStoreError> {
        Ok(self.companies.clone())
    }

    fn list_active_jobs(&self) -> Result<Vec<Candidate>, CandidateStoreError> {
        Ok(self.jobs.clone())
    }
}

pub(super) struct UnavailableCandidateStore;

impl CandidateStore for UnavailableCandidateStore {
    fn list_active_companies(&self) -> Result<Vec<Candidate>, CandidateStoreError> {
        Err(CandidateStoreError::Unavailable("database offline".to_string()))
    }

    fn list_active_jobs(&self) -> Result<Vec<Candidate>, CandidateStoreError> {
        Err(CandidateStoreError::Unavailable("database offline".to_string()))
    }
}

#[derive(Default, Clone)]
pub(super) struct MemorySearchLog {
    entries: Arc<Mutex<Vec<usize>>>,
}

impl MemorySearchLog {
    pub(super) fn recorded_counts(&self) -> Vec<usize> {
        self.entries.lock().expect("log mutex poisoned").clone()
    }
}

impl SearchLog for MemorySearchLog {
    fn record(&self, _query: &MatchQuery, result_count: usize) -> Result<(), SearchLogError> {
        self.entries
            .lock()
            .expect("log mutex poisoned")
            .push(result_count);
        Ok(())
    }
}

pub(super) struct FailingSearchLog;

impl SearchLog for FailingSearchLog {
    fn record(&self, _query: &MatchQuery, _result_count: usize) -> Result<(), SearchLogError> {
        Err(SearchLogError::Transport("log sink offline".to_string()))
    }
}

pub(super) fn build_engine(
    companies: Vec<Candidate>,
) -> (
    SearchEngine<MemoryCandidateStore, MemorySearchLog>,
    Arc<MemorySearchLog>,
) {
    let store = Arc::new(MemoryCandidateStore {
        companies,
        jobs: Vec::new(),
    });
    let log = Arc::new(MemorySearchLog::default());
    let engine = SearchEngine::new(
        store,
        log.clone(),
        Arc::new(catalog()),
        ScoringWeights::default(),
    );
    (engine, log)
}
