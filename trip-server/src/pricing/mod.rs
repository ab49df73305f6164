//! Flight pricing.
//!
//! The planner never talks to an airline or fare API directly. It hands a
//! whole multi-city route to a [`FlightPricingProvider`] and gets back one
//! priced [`FlightLeg`] per requested hop, or fewer when the provider can't
//! route part of the trip under the price ceiling.
//!
//! Two providers are included:
//! - [`SyntheticFlightPricer`] produces deterministic, seeded fares with no
//!   network access (development, tests, demos)
//! - [`HttpFlightPricer`] posts the route to a JSON pricing endpoint

mod client;
mod error;
mod synthetic;

use std::future::Future;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{CityCode, FlightLeg};

pub use client::{HttpFlightPricer, PricingClientConfig};
pub use error::PricingError;
pub use synthetic::SyntheticFlightPricer;

/// One hop of a multi-city route to be priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LegRequest {
    pub origin: CityCode,
    pub destination: CityCode,
    pub date: NaiveDate,
}

impl LegRequest {
    pub fn new(origin: CityCode, destination: CityCode, date: NaiveDate) -> Self {
        Self {
            origin,
            destination,
            date,
        }
    }

    /// Whether a priced leg answers this request.
    pub fn matches(&self, leg: &FlightLeg) -> bool {
        leg.from == self.origin && leg.to == self.destination && leg.departure_date == self.date
    }
}

/// Trait for pricing multi-city routes.
///
/// This abstraction allows the planner to be tested with synthetic data.
pub trait FlightPricingProvider: Send + Sync {
    /// Price every leg of a route.
    ///
    /// Returns legs in request order. Returning fewer legs than requested
    /// means part of the route couldn't be served within `max_price`; that is
    /// not an error. Implementations own their own request timeouts.
    fn price_legs(
        &self,
        legs: &[LegRequest],
        max_price: f64,
    ) -> impl Future<Output = Result<Vec<FlightLeg>, PricingError>> + Send;
}

impl<P: FlightPricingProvider> FlightPricingProvider for Arc<P> {
    fn price_legs(
        &self,
        legs: &[LegRequest],
        max_price: f64,
    ) -> impl Future<Output = Result<Vec<FlightLeg>, PricingError>> + Send {
        (**self).price_legs(legs, max_price)
    }
}

/// The provider the server was configured with.
#[derive(Debug)]
pub enum PricingBackend {
    Synthetic(SyntheticFlightPricer),
    Http(HttpFlightPricer),
}

impl PricingBackend {
    pub fn name(&self) -> &'static str {
        match self {
            PricingBackend::Synthetic(_) => "synthetic",
            PricingBackend::Http(_) => "http",
        }
    }
}

impl FlightPricingProvider for PricingBackend {
    async fn price_legs(
        &self,
        legs: &[LegRequest],
        max_price: f64,
    ) -> Result<Vec<FlightLeg>, PricingError> {
        match self {
            PricingBackend::Synthetic(pricer) => pricer.price_legs(legs, max_price).await,
            PricingBackend::Http(pricer) => pricer.price_legs(legs, max_price).await,
        }
    }
}
