//! Technology compatibility search: pure match scoring plus the engine that
//! ranks and paginates candidates.

pub mod domain;
pub mod engine;
pub mod router;
pub mod scorer;

#[cfg(test)]
mod tests;

pub use domain::{
    AssociationLevel, Candidate, CandidateFilters, CandidateId, CandidateMetadata, InterestType,
    MatchQuery, MatchResult, PageMeta, Pagination, QueryError, SearchMode, SearchPage, SkillLevel,
    TechAssociation, UsageLevel,
};
pub use engine::{
    CandidateStore, CandidateStoreError, SearchEngine, SearchError, SearchLog, SearchLogError,
};
pub use router::search_router;
pub use scorer::{MatchScore, MatchScorer, ScoringWeights, WeightsError};
