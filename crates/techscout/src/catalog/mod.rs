//! Read-only view of the technology reference catalog.
//!
//! Catalog rows are administered outside this crate; the engine only ever
//! reads them, so the catalog is modeled as an immutable snapshot built once
//! from whatever store the hosting service uses.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for technologies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TechId(pub String);

impl fmt::Display for TechId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TechId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Broad grouping used for catalog browsing and query filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TechCategory {
    Frontend,
    Backend,
    Database,
    Devops,
    Mobile,
    AiMl,
    DataScience,
    Testing,
    Design,
    Other,
}

impl TechCategory {
    pub const fn label(self) -> &'static str {
        match self {
            TechCategory::Frontend => "frontend",
            TechCategory::Backend => "backend",
            TechCategory::Database => "database",
            TechCategory::Devops => "devops",
            TechCategory::Mobile => "mobile",
            TechCategory::AiMl => "ai_ml",
            TechCategory::DataScience => "data_science",
            TechCategory::Testing => "testing",
            TechCategory::Design => "design",
            TechCategory::Other => "other",
        }
    }
}

/// Immutable reference data describing one technology.
///
/// `popularity_score` and `market_demand_score` are on a 0.0–10.0 scale,
/// `learning_difficulty` is ordinal 1–5.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Technology {
    pub id: TechId,
    pub category: TechCategory,
    pub popularity_score: f32,
    pub market_demand_score: f32,
    pub learning_difficulty: u8,
}

/// Errors surfaced by catalog lookups.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("unknown technology '{0}'")]
    UnknownTechnology(TechId),
}

/// In-memory snapshot of the technology catalog.
#[derive(Debug, Clone, Default)]
pub struct TechnologyCatalog {
    entries: BTreeMap<TechId, Technology>,
}

impl TechnologyCatalog {
    /// Build a snapshot from catalog rows. Later duplicates win, matching the
    /// unique-id constraint of the administered table.
    pub fn from_technologies<I>(technologies: I) -> Self
    where
        I: IntoIterator<Item = Technology>,
    {
        let entries = technologies
            .into_iter()
            .map(|technology| (technology.id.clone(), technology))
            .collect();
        Self { entries }
    }

    pub fn get(&self, id: &TechId) -> Result<&Technology, CatalogError> {
        self.entries
            .get(id)
            .ok_or_else(|| CatalogError::UnknownTechnology(id.clone()))
    }

    /// Resolve ids in order, silently omitting unknown ones. Callers that
    /// care about completeness must compare lengths themselves.
    pub fn list_by_ids(&self, ids: &[TechId]) -> Vec<&Technology> {
        ids.iter()
            .filter_map(|id| self.entries.get(id))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
