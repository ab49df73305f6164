//! Search and itinerary storage.
//!
//! Generation runs hand their ranked results to an [`ItinerarySink`] and
//! never read them back. [`InMemoryStore`] is the sink the server uses; it
//! also keeps submitted searches and answers the lookups the HTTP API needs.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::{Itinerary, ItineraryId, SearchCriteria, SearchId};
use crate::planner::by_price;

/// Where finished runs deliver their itineraries.
pub trait ItinerarySink: Send + Sync {
    fn save_all(&self, itineraries: Vec<Itinerary>) -> impl Future<Output = ()> + Send;
}

#[derive(Debug, Default)]
struct StoreInner {
    searches: Vec<SearchCriteria>,
    /// In save order.
    itineraries: Vec<Itinerary>,
}

/// Thread-safe in-memory store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a submitted search, replacing any with the same id.
    pub async fn save_search(&self, criteria: SearchCriteria) {
        let mut guard = self.inner.write().await;
        guard.searches.retain(|s| s.id() != criteria.id());
        guard.searches.push(criteria);
    }

    /// Look up a submitted search.
    pub async fn search(&self, id: &SearchId) -> Option<SearchCriteria> {
        let guard = self.inner.read().await;
        guard.searches.iter().find(|s| s.id() == id).cloned()
    }

    /// A search's itineraries, cheapest first.
    pub async fn itineraries_for(&self, search_id: &SearchId) -> Vec<Itinerary> {
        let guard = self.inner.read().await;
        let mut found: Vec<Itinerary> = guard
            .itineraries
            .iter()
            .filter(|i| i.search_id() == search_id)
            .cloned()
            .collect();
        found.sort_by(by_price);
        found
    }

    /// Look up one itinerary.
    pub async fn itinerary(&self, id: &ItineraryId) -> Option<Itinerary> {
        let guard = self.inner.read().await;
        guard.itineraries.iter().find(|i| i.id() == id).cloned()
    }

    /// The `limit` cheapest itineraries across all searches.
    pub async fn cheapest(&self, limit: usize) -> Vec<Itinerary> {
        let mut all = self.inner.read().await.itineraries.clone();
        all.sort_by(by_price);
        all.truncate(limit);
        all
    }

    /// Every itinerary costing at most `max_budget`, cheapest first.
    pub async fn within_budget(&self, max_budget: f64) -> Vec<Itinerary> {
        let guard = self.inner.read().await;
        let mut found: Vec<Itinerary> = guard
            .itineraries
            .iter()
            .filter(|i| i.total_price() <= max_budget)
            .cloned()
            .collect();
        found.sort_by(by_price);
        found
    }

    /// Remove a search and all its itineraries.
    ///
    /// Returns whether anything was removed.
    pub async fn delete_search(&self, id: &SearchId) -> bool {
        let mut guard = self.inner.write().await;
        let searches = guard.searches.len();
        let itineraries = guard.itineraries.len();

        guard.searches.retain(|s| s.id() != id);
        guard.itineraries.retain(|i| i.search_id() != id);

        guard.searches.len() != searches || guard.itineraries.len() != itineraries
    }

    /// Number of stored itineraries.
    pub async fn len(&self) -> usize {
        self.inner.read().await.itineraries.len()
    }

    /// Check if no itineraries are stored.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.itineraries.is_empty()
    }
}

impl ItinerarySink for InMemoryStore {
    async fn save_all(&self, itineraries: Vec<Itinerary>) {
        let mut guard = self.inner.write().await;
        guard.itineraries.extend(itineraries);
    }
}
