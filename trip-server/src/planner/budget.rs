//! Trip cost estimation and the budget gate.

use crate::domain::{BudgetBreakdown, FlightLeg};

use super::config::PlannerConfig;

/// Price a trip: flights plus per-day accommodation and food estimates.
///
/// `remaining` is `budget - total` computed from the same `total`, so the
/// two always agree exactly.
pub fn evaluate(
    legs: &[FlightLeg],
    stay_days: u32,
    budget: f64,
    config: &PlannerConfig,
) -> BudgetBreakdown {
    let flights: f64 = legs.iter().map(|leg| leg.price).sum();
    let days = f64::from(stay_days);
    let accommodation = days * config.accommodation_rate;
    let food = days * config.food_rate;
    let total = flights + accommodation + food;

    BudgetBreakdown {
        flights,
        accommodation,
        food,
        total,
        remaining: budget - total,
    }
}

/// Whether a priced trip fits the budget.
pub fn is_within_budget(breakdown: &BudgetBreakdown, budget: f64) -> bool {
    breakdown.total <= budget
}
