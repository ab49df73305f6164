//! Caching layer for flight pricing.
//!
//! Many branches of one search share legs: every combination starting with
//! BCN flies NYC→BCN on the departure date. Quotes are cached per leg so a
//! route whose legs are all known never reaches the provider.
//!
//! Only complete answers are cached. A shortfall doesn't say which leg was
//! missing, so nothing from it is kept.

use std::time::Duration;

use chrono::NaiveDate;
use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::{CityCode, FlightLeg};
use crate::pricing::{FlightPricingProvider, LegRequest, PricingError};

/// Cache key for a quote: (from, to, date, price ceiling bits).
type QuoteKey = (CityCode, CityCode, NaiveDate, u64);

fn quote_key(request: &LegRequest, max_price: f64) -> QuoteKey {
    (
        request.origin,
        request.destination,
        request.date,
        max_price.to_bits(),
    )
}

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_capacity: 10_000,
        }
    }
}

/// Flight pricer with caching.
///
/// Wraps any `FlightPricingProvider` and caches its per-leg quotes.
pub struct CachedFlightPricer<P> {
    inner: P,
    quotes: MokaCache<QuoteKey, FlightLeg>,
}

impl<P: FlightPricingProvider> CachedFlightPricer<P> {
    /// Create a new cached pricer.
    pub fn new(inner: P, config: &CacheConfig) -> Self {
        let quotes = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, quotes }
    }

    /// Get cache statistics.
    pub fn entry_count(&self) -> u64 {
        self.quotes.entry_count()
    }

    async fn cached_route(&self, legs: &[LegRequest], max_price: f64) -> Option<Vec<FlightLeg>> {
        let mut cached = Vec::with_capacity(legs.len());
        for leg in legs {
            cached.push(self.quotes.get(&quote_key(leg, max_price)).await?);
        }
        Some(cached)
    }
}

impl<P: FlightPricingProvider> FlightPricingProvider for CachedFlightPricer<P> {
    async fn price_legs(
        &self,
        legs: &[LegRequest],
        max_price: f64,
    ) -> Result<Vec<FlightLeg>, PricingError> {
        if let Some(cached) = self.cached_route(legs, max_price).await {
            trace!(legs = legs.len(), "route served from cache");
            return Ok(cached);
        }

        let priced = self.inner.price_legs(legs, max_price).await?;

        let complete = priced.len() == legs.len()
            && legs.iter().zip(&priced).all(|(req, leg)| req.matches(leg));
        if complete {
            for (req, leg) in legs.iter().zip(&priced) {
                self.quotes
                    .insert(quote_key(req, max_price), leg.clone())
                    .await;
            }
            trace!(entries = self.entry_count(), "route quotes cached");
        }

        Ok(priced)
    }
}
