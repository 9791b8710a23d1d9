//! Technology match scoring and scout campaign engine.
//!
//! The crate is the algorithmic core of the recruiting marketplace: it scores
//! companies and job postings against technology queries, ranks and paginates
//! the results, and manages bulk scout invitation campaigns with
//! per-recipient response tracking and on-demand statistics. Persistence,
//! authentication, and messaging live behind the traits defined here and are
//! supplied by the hosting service.

pub mod catalog;
pub mod config;
pub mod error;
pub mod scout;
pub mod search;
pub mod telemetry;
