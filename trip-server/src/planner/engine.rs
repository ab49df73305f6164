//! The generation run.
//!
//! A run walks `STARTED → FILTERING → ENUMERATING → (DISTRIBUTING →
//! ASSEMBLING → EVALUATING)* → RANKING → DONE`. Branches are assembled a few
//! combinations at a time, but results are consumed in enumeration order so
//! a run's output depends only on its inputs.

use std::collections::BTreeMap;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::stream::FuturesOrdered;
use futures::{FutureExt, StreamExt};
use serde::Serialize;
use tracing::{debug, info, trace, warn};

use crate::catalog::ReferenceCatalog;
use crate::domain::{CityCode, Itinerary, SearchCriteria, SearchId};
use crate::pricing::FlightPricingProvider;
use crate::seed::derive_seed;
use crate::weather::WeatherProvider;

use super::assemble::Assembler;
use super::budget;
use super::combinations::Combinations;
use super::config::PlannerConfig;
use super::distribution::{DayDistribution, day_distributions};
use super::error::{BranchRejection, RejectionKind};
use super::filter::candidate_destinations;
use super::rank::rank_itineraries;

/// Where a run is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Started,
    Filtering,
    Enumerating,
    Distributing,
    Assembling,
    Evaluating,
    Ranking,
    Done,
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunPhase::Started => "STARTED",
            RunPhase::Filtering => "FILTERING",
            RunPhase::Enumerating => "ENUMERATING",
            RunPhase::Distributing => "DISTRIBUTING",
            RunPhase::Assembling => "ASSEMBLING",
            RunPhase::Evaluating => "EVALUATING",
            RunPhase::Ranking => "RANKING",
            RunPhase::Done => "DONE",
        };
        f.write_str(name)
    }
}

/// Counters describing what a run did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Candidate destinations after filtering.
    pub candidates: usize,
    /// Combinations whose branches were explored.
    pub combinations: usize,
    /// Branches handed to the assembler.
    pub branches: usize,
    /// Itineraries that passed the budget gate.
    pub accepted: usize,
    /// Rejected branches by reason.
    pub rejections: BTreeMap<&'static str, usize>,
}

impl RunStats {
    fn reject(&mut self, kind: RejectionKind) {
        *self.rejections.entry(kind.as_str()).or_default() += 1;
    }

    /// Rejections recorded for one reason.
    pub fn rejected(&self, kind: RejectionKind) -> usize {
        self.rejections.get(kind.as_str()).copied().unwrap_or(0)
    }
}

/// The outcome of a run: ranked itineraries plus statistics.
#[derive(Debug, Clone, Default)]
pub struct GenerationResult {
    pub itineraries: Vec<Itinerary>,
    pub stats: RunStats,
}

/// Everything one combination produced.
#[derive(Debug, Default)]
struct CombinationOutcome {
    accepted: Vec<Itinerary>,
    branches: usize,
    rejections: Vec<RejectionKind>,
}

/// Itinerary generator.
///
/// Holds the read-only collaborators a run needs. One planner serves any
/// number of concurrent runs.
pub struct Planner<P, W> {
    catalog: Arc<ReferenceCatalog>,
    pricer: P,
    weather: W,
    config: PlannerConfig,
}

impl<P: FlightPricingProvider, W: WeatherProvider> Planner<P, W> {
    pub fn new(catalog: Arc<ReferenceCatalog>, pricer: P, weather: W, config: PlannerConfig) -> Self {
        Self {
            catalog,
            pricer,
            weather,
            config,
        }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn catalog(&self) -> &ReferenceCatalog {
        &self.catalog
    }

    /// Generate itineraries for a search.
    ///
    /// Never fails: infeasible searches, provider trouble and over-budget
    /// trips only prune branches, and the result may be empty.
    pub async fn generate(&self, criteria: &SearchCriteria) -> GenerationResult {
        let search_id = criteria.id();
        let mut stats = RunStats::default();
        phase(search_id, RunPhase::Started);

        phase(search_id, RunPhase::Filtering);
        let candidates = candidate_destinations(&self.catalog, criteria);
        stats.candidates = candidates.len();

        if criteria.is_infeasible() {
            debug!(
                %search_id,
                total_days = criteria.total_days(),
                cities = criteria.city_count(),
                min_days = criteria.min_days_per_city(),
                "trip too short for the requested cities"
            );
            stats.reject(RejectionKind::InfeasibleDays);
            return done(search_id, Vec::new(), stats);
        }

        if candidates.len() < criteria.city_count() {
            debug!(
                %search_id,
                candidates = candidates.len(),
                cities = criteria.city_count(),
                "not enough candidate destinations"
            );
            return done(search_id, Vec::new(), stats);
        }

        let distributions = day_distributions(
            criteria.total_days(),
            criteria.city_count(),
            criteria.min_days_per_city(),
            criteria.max_days_per_city(),
        );

        phase(search_id, RunPhase::Enumerating);
        let mut combinations =
            Combinations::new(&candidates, criteria.city_count(), criteria.excluded());
        debug!(
            %search_id,
            pool = combinations.pool_size(),
            cities = criteria.city_count(),
            distributions = distributions.len(),
            "enumerating combinations"
        );
        let limit = self.config.max_concurrent.max(1);
        let mut in_flight = FuturesOrdered::new();
        let mut accepted = Vec::new();

        loop {
            while in_flight.len() < limit {
                let Some(combination) = combinations.next() else {
                    break;
                };
                in_flight.push_back(self.explore(criteria, combination, &distributions));
            }

            let Some(outcome) = in_flight.next().await else {
                break;
            };

            stats.combinations += 1;
            stats.branches += outcome.branches;
            for kind in outcome.rejections {
                stats.reject(kind);
            }
            accepted.extend(outcome.accepted);

            if accepted.len() >= self.config.max_results {
                debug!(%search_id, accepted = accepted.len(), "result cap reached");
                break;
            }
        }
        // Branches still in flight past the cap are abandoned.
        drop(in_flight);
        stats.accepted = accepted.len();

        phase(search_id, RunPhase::Ranking);
        let ranked = rank_itineraries(accepted, self.config.max_results);

        done(search_id, ranked, stats)
    }

    /// Explore every distribution of one combination, catching panics.
    async fn explore(
        &self,
        criteria: &SearchCriteria,
        combination: Vec<CityCode>,
        distributions: &[DayDistribution],
    ) -> CombinationOutcome {
        let route = route_label(&combination);

        match AssertUnwindSafe(self.explore_inner(criteria, &combination, distributions))
            .catch_unwind()
            .await
        {
            Ok(outcome) => outcome,
            Err(_) => {
                warn!(search_id = %criteria.id(), %route, "branch panicked, skipping combination");
                CombinationOutcome {
                    rejections: vec![RejectionKind::Fault],
                    ..CombinationOutcome::default()
                }
            }
        }
    }

    async fn explore_inner(
        &self,
        criteria: &SearchCriteria,
        combination: &[CityCode],
        distributions: &[DayDistribution],
    ) -> CombinationOutcome {
        let search_id = criteria.id();
        let route = route_label(combination);
        let assembler = Assembler::new(&self.catalog, &self.pricer, &self.weather, &self.config);
        let mut outcome = CombinationOutcome::default();

        trace!(%search_id, %route, phase = %RunPhase::Distributing, distributions = distributions.len());

        for (index, days) in distributions.iter().enumerate() {
            if outcome.accepted.len() >= self.config.max_per_combination {
                break;
            }
            outcome.branches += 1;

            trace!(%search_id, %route, ?days, phase = %RunPhase::Assembling);
            let seed = tip_seed(self.config.seed, combination, index);
            let result = assembler
                .assemble(criteria, combination, days, seed)
                .await
                .and_then(|itinerary| {
                    trace!(%search_id, %route, phase = %RunPhase::Evaluating);
                    let total = itinerary.total_price();
                    if budget::is_within_budget(itinerary.budget(), criteria.budget()) {
                        Ok(itinerary)
                    } else {
                        Err(BranchRejection::BudgetExceeded {
                            total,
                            budget: criteria.budget(),
                        })
                    }
                });

            match result {
                Ok(itinerary) => outcome.accepted.push(itinerary),
                Err(rejection) => {
                    log_rejection(criteria, &route, &rejection);
                    outcome.rejections.push(rejection.kind());
                }
            }
        }

        outcome
    }
}

fn phase(search_id: &SearchId, phase: RunPhase) {
    debug!(%search_id, %phase, "generation phase");
}

fn done(
    search_id: &SearchId,
    itineraries: Vec<Itinerary>,
    stats: RunStats,
) -> GenerationResult {
    phase(search_id, RunPhase::Done);
    info!(
        %search_id,
        itineraries = itineraries.len(),
        combinations = stats.combinations,
        branches = stats.branches,
        "generation finished"
    );
    GenerationResult { itineraries, stats }
}

fn log_rejection(criteria: &SearchCriteria, route: &str, rejection: &BranchRejection) {
    let search_id = criteria.id();
    match rejection {
        BranchRejection::BudgetExceeded { .. } | BranchRejection::InfeasibleDays => {
            trace!(%search_id, %route, reason = %rejection, "branch pruned");
        }
        BranchRejection::ProviderShortfall { .. }
        | BranchRejection::LegMismatch { .. }
        | BranchRejection::Provider(_) => {
            debug!(%search_id, %route, reason = %rejection, "branch rejected");
        }
        BranchRejection::Fault(_) => {
            warn!(%search_id, %route, reason = %rejection, "branch faulted");
        }
    }
}

fn route_label(combination: &[CityCode]) -> String {
    combination
        .iter()
        .map(CityCode::as_str)
        .collect::<Vec<_>>()
        .join("-")
}

/// Seed for one branch's tip shuffle.
fn tip_seed(base: u64, combination: &[CityCode], distribution: usize) -> u64 {
    let index = distribution.to_le_bytes();
    let mut parts: Vec<&[u8]> = combination.iter().map(|c| c.as_str().as_bytes()).collect();
    parts.push(&index);
    derive_seed(base, &parts)
}
