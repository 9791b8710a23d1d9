use std::collections::BTreeSet;
use std::sync::Arc;

use clap::Args;
use serde_json::json;

use techscout::catalog::{TechCategory, TechId, Technology, TechnologyCatalog};
use techscout::error::AppError;
use techscout::scout::{CompanyId, JobPostingId, ScoutDecision, ScoutState, StudentId};
use techscout::search::{
    Candidate, CandidateFilters, CandidateId, CandidateMetadata, MatchQuery, Pagination,
    ScoringWeights, SearchEngine, SearchMode, TechAssociation, UsageLevel,
};

use crate::infra::{InMemoryCandidateStore, InMemoryInvitationStore, TracingSearchLog};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Pretty-print the JSON output
    #[arg(long)]
    pub(crate) pretty: bool,
}

pub(crate) fn seed_catalog() -> TechnologyCatalog {
    let tech = |id: &str, category, popularity, demand, difficulty| Technology {
        id: TechId::from(id),
        category,
        popularity_score: popularity,
        market_demand_score: demand,
        learning_difficulty: difficulty,
    };
    TechnologyCatalog::from_technologies(vec![
        tech("go", TechCategory::Backend, 7.8, 8.5, 3),
        tech("rust", TechCategory::Backend, 8.4, 7.9, 5),
        tech("typescript", TechCategory::Frontend, 9.1, 9.0, 2),
        tech("react", TechCategory::Frontend, 9.0, 8.8, 2),
        tech("postgresql", TechCategory::Database, 8.2, 8.6, 3),
        tech("kubernetes", TechCategory::Devops, 8.0, 8.9, 4),
        tech("terraform", TechCategory::Devops, 7.2, 7.8, 3),
        tech("pytorch", TechCategory::AiMl, 8.6, 9.2, 4),
    ])
}

pub(crate) fn seed_candidates() -> InMemoryCandidateStore {
    let usage = |id: &str, main: bool| {
        TechAssociation::usage(id, if main { UsageLevel::Main } else { UsageLevel::Sub }, main)
    };
    let company = |id: &str, location: &str, headcount: u32, techs: Vec<TechAssociation>| Candidate {
        id: CandidateId::from(id),
        associations: techs,
        metadata: CandidateMetadata {
            category: Some("software".to_string()),
            location: Some(location.to_string()),
            headcount: Some(headcount),
        },
    };

    InMemoryCandidateStore {
        companies: vec![
            company(
                "company-kitsune",
                "Tokyo",
                120,
                vec![usage("go", true), usage("postgresql", false), usage("kubernetes", false)],
            ),
            company(
                "company-umi",
                "Osaka",
                40,
                vec![usage("rust", true), usage("postgresql", false)],
            ),
            company(
                "company-hoshi",
                "Tokyo",
                300,
                vec![usage("typescript", true), usage("react", false)],
            ),
        ],
        jobs: vec![
            Candidate {
                id: CandidateId::from("job-backend-go"),
                associations: vec![usage("go", true), usage("kubernetes", false)],
                metadata: CandidateMetadata::default(),
            },
            Candidate {
                id: CandidateId::from("job-ml-platform"),
                associations: vec![usage("pytorch", true), usage("kubernetes", false)],
                metadata: CandidateMetadata::default(),
            },
        ],
    }
}

fn demo_error(err: impl std::fmt::Display) -> AppError {
    AppError::Io(std::io::Error::other(err.to_string()))
}

/// Walk the search and campaign flows end to end against seeded in-memory
/// stores and print the outcome, for demos and smoke checks.
pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let engine = SearchEngine::new(
        Arc::new(seed_candidates()),
        Arc::new(TracingSearchLog),
        Arc::new(seed_catalog()),
        ScoringWeights::default(),
    );

    let query = MatchQuery {
        required: [TechId::from("go"), TechId::from("postgresql")]
            .into_iter()
            .collect(),
        preferred: [TechId::from("kubernetes")].into_iter().collect(),
        excluded: BTreeSet::new(),
        mode: SearchMode::And,
        min_score: 50.0,
        filters: CandidateFilters::default(),
    };
    let page = engine
        .search_companies(&query, Pagination::default())
        .map_err(demo_error)?;

    let scout = ScoutState::new(Arc::new(InMemoryInvitationStore::default()));
    let report = scout
        .manager
        .create_bulk(
            CompanyId("company-kitsune".to_string()),
            &[
                StudentId("student-mei".to_string()),
                StudentId("student-rin".to_string()),
                StudentId("student-sora".to_string()),
            ],
            JobPostingId("job-backend-go".to_string()),
            "We would love to talk about our Go platform team.".to_string(),
            Some("demo-template".to_string()),
        )
        .map_err(demo_error)?;

    scout
        .manager
        .respond(
            &report.created[0].id,
            &report.created[0].student,
            ScoutDecision::Accept,
        )
        .map_err(demo_error)?;

    let stats = scout
        .aggregator
        .stats(&report.campaign)
        .map_err(demo_error)?;

    let summary = json!({
        "search": {
            "results": page.results,
            "meta": page.meta,
        },
        "campaign": {
            "id": report.campaign,
            "created_count": report.created_count(),
            "skipped": report.skipped,
            "stats": stats,
        },
    });

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&summary)
    } else {
        serde_json::to_string(&summary)
    }
    .map_err(demo_error)?;

    println!("{rendered}");
    Ok(())
}
