//! Domain types for the multi-city trip planner.
//!
//! This module contains the core domain model types: validated city codes,
//! search criteria, and the itineraries built from them. All types enforce
//! their invariants at construction time, so code that receives these types
//! can trust their validity.

mod city_code;
mod criteria;
mod error;
mod itinerary;

pub use city_code::{CityCode, InvalidCityCode};
pub use criteria::{SearchCriteria, SearchId};
pub use error::DomainError;
pub use itinerary::{
    BudgetBreakdown, CityVisit, FlightLeg, Itinerary, ItineraryId, WeatherForecast,
};

#[cfg(test)]
pub(crate) use itinerary::test_support;
