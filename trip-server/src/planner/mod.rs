//! Itinerary generation.
//!
//! This module implements the search that answers: "which round trips
//! through N cities fit my dates and my budget?"
//!
//! Candidate destinations are filtered from the catalog, enumerated as
//! combinations, given a few day distributions each, priced and assembled,
//! checked against the budget, and finally ranked by price.

mod assemble;
mod budget;
mod combinations;
mod config;
mod distribution;
mod engine;
mod error;
mod filter;
mod rank;

#[cfg(test)]
pub(crate) mod test_doubles;

pub use assemble::{Assembler, leg_requests};
pub use budget::{evaluate, is_within_budget};
pub use combinations::Combinations;
pub use config::PlannerConfig;
pub use distribution::{DayDistribution, day_distributions};
pub use engine::{GenerationResult, Planner, RunPhase, RunStats};
pub use error::{BranchRejection, RejectionKind};
pub use filter::candidate_destinations;
pub use rank::{by_price, rank_itineraries};
