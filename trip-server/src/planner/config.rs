//! Generation configuration for the itinerary planner.

use std::time::Duration;

/// Configuration parameters for itinerary generation.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Estimated accommodation cost per stay day.
    pub accommodation_rate: f64,

    /// Estimated food cost per stay day.
    pub food_rate: f64,

    /// Maximum number of itineraries to return from one run.
    /// Exploration stops once this many have been accepted.
    pub max_results: usize,

    /// Maximum number of itineraries kept per city combination.
    pub max_per_combination: usize,

    /// Maximum number of combinations assembled at once.
    pub max_concurrent: usize,

    /// How long a single pricing call may take before its branch is dropped.
    pub provider_timeout: Duration,

    /// Totals above this earn the "fly midweek" tip.
    pub tip_total_threshold: f64,

    /// Accommodation estimates above this earn the "hostels" tip.
    pub tip_accommodation_threshold: f64,

    /// Maximum number of optimization tips per itinerary.
    pub max_tips: usize,

    /// Seed for the cosmetic tip shuffle.
    pub seed: u64,
}

impl PlannerConfig {
    /// Create a configuration with the given rates and limits.
    ///
    /// Everything else keeps its default.
    pub fn new(
        accommodation_rate: f64,
        food_rate: f64,
        max_results: usize,
        max_per_combination: usize,
    ) -> Self {
        Self {
            accommodation_rate,
            food_rate,
            max_results,
            max_per_combination,
            ..Self::default()
        }
    }

    /// Set the number of combinations assembled concurrently.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n.max(1);
        self
    }

    /// Set the per-call pricing timeout.
    pub fn with_provider_timeout(mut self, timeout: Duration) -> Self {
        self.provider_timeout = timeout;
        self
    }

    /// Set the tip shuffle seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            accommodation_rate: 50.0,
            food_rate: 20.0,
            max_results: 12,
            max_per_combination: 2,
            max_concurrent: 4,
            provider_timeout: Duration::from_secs(10),
            tip_total_threshold: 700.0,
            tip_accommodation_threshold: 250.0,
            max_tips: 2,
            seed: 0,
        }
    }
}
