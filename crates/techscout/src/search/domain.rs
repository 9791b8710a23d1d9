use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::TechId;

/// Identifier wrapper for scored candidates (companies or job postings).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CandidateId(pub String);

impl From<&str> for CandidateId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// How heavily a company leans on a technology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageLevel {
    Main,
    Sub,
    Experimental,
}

/// Self-assessed proficiency on a student's technology interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

/// Why a student lists a technology on their profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterestType {
    WantToLearn,
    CurrentlyLearning,
    ExperiencedWith,
    ExpertIn,
}

/// Qualitative strength of one subject↔technology association.
///
/// Companies record usage, students record skill and interest. Profile
/// management enforces at most one association per (subject, technology)
/// pair; this crate only reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssociationLevel {
    Usage { level: UsageLevel, is_main: bool },
    Interest { skill: SkillLevel, interest: InterestType },
}

impl AssociationLevel {
    /// Flagship associations anchor the open-ended browse score: a company's
    /// main technologies, or a student's expert-level ones.
    pub fn is_flagship(&self) -> bool {
        match self {
            AssociationLevel::Usage { level, is_main } => {
                *is_main || matches!(level, UsageLevel::Main)
            }
            AssociationLevel::Interest { skill, interest } => {
                matches!(skill, SkillLevel::Expert) || matches!(interest, InterestType::ExpertIn)
            }
        }
    }
}

/// One subject↔technology edge as read from the profile store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechAssociation {
    pub technology: TechId,
    pub level: AssociationLevel,
}

impl TechAssociation {
    pub fn usage(technology: impl Into<TechId>, level: UsageLevel, is_main: bool) -> Self {
        Self {
            technology: technology.into(),
            level: AssociationLevel::Usage { level, is_main },
        }
    }

    pub fn interest(
        technology: impl Into<TechId>,
        skill: SkillLevel,
        interest: InterestType,
    ) -> Self {
        Self {
            technology: technology.into(),
            level: AssociationLevel::Interest { skill, interest },
        }
    }
}

/// Governs whether `required` technologies must all match or any may.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    And,
    Or,
}

/// Optional metadata filters applied before scoring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_headcount: Option<u32>,
}

impl CandidateFilters {
    pub fn matches(&self, metadata: &CandidateMetadata) -> bool {
        if let Some(category) = &self.category {
            if metadata.category.as_deref() != Some(category.as_str()) {
                return false;
            }
        }
        if let Some(location) = &self.location {
            if metadata.location.as_deref() != Some(location.as_str()) {
                return false;
            }
        }
        if let Some(min) = self.min_headcount {
            if metadata.headcount.map_or(true, |count| count < min) {
                return false;
            }
        }
        true
    }
}

/// Descriptive attributes of a candidate the filters can act on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headcount: Option<u32>,
}

/// One scoreable candidate pulled from the data-access layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub associations: Vec<TechAssociation>,
    #[serde(default)]
    pub metadata: CandidateMetadata,
}

/// A technology compatibility query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchQuery {
    #[serde(default)]
    pub required: BTreeSet<TechId>,
    #[serde(default)]
    pub preferred: BTreeSet<TechId>,
    #[serde(default)]
    pub excluded: BTreeSet<TechId>,
    pub mode: SearchMode,
    #[serde(default)]
    pub min_score: f32,
    #[serde(default)]
    pub filters: CandidateFilters,
}

impl MatchQuery {
    /// Reject malformed queries before any data access.
    pub fn validate(&self) -> Result<(), QueryError> {
        if !(0.0..=100.0).contains(&self.min_score) {
            return Err(QueryError::ScoreOutOfRange(self.min_score));
        }
        let all_ids = self
            .required
            .iter()
            .chain(self.preferred.iter())
            .chain(self.excluded.iter());
        for id in all_ids {
            if id.0.trim().is_empty() {
                return Err(QueryError::EmptyTechnologyId);
            }
        }
        Ok(())
    }

    /// Open-ended browse: no technology requirements at all.
    pub fn is_browse(&self) -> bool {
        self.required.is_empty() && self.preferred.is_empty()
    }
}

/// Validation failures raised before scoring.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum QueryError {
    #[error("technology ids must not be empty")]
    EmptyTechnologyId,
    #[error("min_score {0} is outside 0..=100")]
    ScoreOutOfRange(f32),
}

/// A scored candidate, carrying the associations that matched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub candidate: CandidateId,
    pub score: f32,
    pub matched_required: Vec<TechId>,
    pub matched_preferred: Vec<TechId>,
}

/// One-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 20,
        }
    }
}

/// Pagination metadata returned alongside a result page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
}

/// A ranked, paginated slice of search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    pub results: Vec<MatchResult>,
    pub meta: PageMeta,
}
