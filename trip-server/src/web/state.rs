//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedFlightPricer;
use crate::planner::Planner;
use crate::pricing::PricingBackend;
use crate::store::InMemoryStore;
use crate::tasks::SearchTasks;
use crate::weather::SeasonalWeather;

/// The planner the server runs.
pub type AppPlanner = Planner<CachedFlightPricer<PricingBackend>, SeasonalWeather>;

/// Background runs of [`AppPlanner`] saving into the store.
pub type AppTasks = SearchTasks<CachedFlightPricer<PricingBackend>, SeasonalWeather, InMemoryStore>;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Background generation runs
    pub tasks: AppTasks,

    /// Searches and their itineraries
    pub store: Arc<InMemoryStore>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(planner: AppPlanner, store: InMemoryStore) -> Self {
        let store = Arc::new(store);
        let tasks = SearchTasks::new(Arc::new(planner), Arc::clone(&store));
        Self { tasks, store }
    }
}
