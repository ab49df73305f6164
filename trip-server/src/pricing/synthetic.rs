//! Synthetic flight pricer for running without a fare API.
//!
//! Every fare, schedule and flight number is derived from the pricer's seed
//! and the leg itself (origin, destination, date), so the same leg always
//! gets the same quote no matter which route it appears in or when it's
//! asked for.

use chrono::{Duration, NaiveTime};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::domain::FlightLeg;
use crate::seed::rng_for;

use super::error::PricingError;
use super::{FlightPricingProvider, LegRequest};

/// Carriers used for synthetic flights.
const CARRIERS: &[&str] = &["AF", "LH", "BA", "IB", "EJU"];

/// Default lowest fare for a leg.
const DEFAULT_BASE_FARE: f64 = 80.0;

/// Default spread above the base fare.
const DEFAULT_FARE_SPREAD: f64 = 120.0;

/// Deterministic, seeded flight pricer.
#[derive(Debug, Clone)]
pub struct SyntheticFlightPricer {
    seed: u64,
    base_fare: f64,
    fare_spread: f64,
}

impl SyntheticFlightPricer {
    /// Create a pricer with default fares (80 to 200 per leg).
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            base_fare: DEFAULT_BASE_FARE,
            fare_spread: DEFAULT_FARE_SPREAD,
        }
    }

    /// Set the fare range: each leg costs `base` plus up to `spread`.
    pub fn with_fares(mut self, base: f64, spread: f64) -> Self {
        self.base_fare = base;
        self.fare_spread = spread.max(0.0);
        self
    }

    /// Quote a single leg.
    pub fn quote(&self, request: &LegRequest) -> FlightLeg {
        let date = request.date.to_string();
        let mut rng = rng_for(
            self.seed,
            &[
                request.origin.as_str().as_bytes(),
                request.destination.as_str().as_bytes(),
                date.as_bytes(),
            ],
        );

        let carrier = CARRIERS.choose(&mut rng).copied().unwrap_or("XX");
        let number: u32 = rng.gen_range(1000..10000);

        let hour: u32 = rng.gen_range(6..16);
        let minute: u32 = [0, 15, 30, 45].choose(&mut rng).copied().unwrap_or(0);
        let departure_time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN);
        let flight_mins: i64 = rng.gen_range(60..=240);
        let arrival = request.date.and_time(departure_time) + Duration::minutes(flight_mins);

        let spread: f64 = if self.fare_spread > 0.0 {
            rng.gen_range(0.0..self.fare_spread)
        } else {
            0.0
        };
        let price = ((self.base_fare + spread) * 100.0).round() / 100.0;

        FlightLeg {
            from: request.origin,
            to: request.destination,
            departure_date: request.date,
            departure_time,
            arrival_date: arrival.date(),
            arrival_time: arrival.time(),
            carrier: carrier.to_string(),
            flight_number: format!("{carrier}{number}"),
            price,
            duration: format!("{}h {}m", flight_mins / 60, flight_mins % 60),
        }
    }
}

impl FlightPricingProvider for SyntheticFlightPricer {
    async fn price_legs(
        &self,
        legs: &[LegRequest],
        max_price: f64,
    ) -> Result<Vec<FlightLeg>, PricingError> {
        // Legs over the ceiling are withheld, as a real fare search would.
        Ok(legs
            .iter()
            .map(|leg| self.quote(leg))
            .filter(|quote| quote.price <= max_price)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CityCode;
    use chrono::NaiveDate;

    fn request(from: &str, to: &str, day: u32) -> LegRequest {
        LegRequest::new(
            CityCode::parse(from).unwrap(),
            CityCode::parse(to).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, day).unwrap(),
        )
    }

    #[test]
    fn quotes_are_deterministic() {
        let pricer = SyntheticFlightPricer::new(42);
        let req = request("NYC", "BCN", 1);

        assert_eq!(pricer.quote(&req), pricer.quote(&req));
        assert_eq!(pricer.quote(&req), SyntheticFlightPricer::new(42).quote(&req));
    }

    #[test]
    fn quote_matches_request() {
        let pricer = SyntheticFlightPricer::new(1);
        let req = request("BCN", "ROM", 5);
        let leg = pricer.quote(&req);

        assert!(req.matches(&leg));
        assert!(leg.price >= 80.0 && leg.price < 200.0);
        assert!(leg.arrival() > leg.departure());
        assert_eq!(leg.arrival_date, leg.departure_date);
        assert!(leg.flight_number.starts_with(&leg.carrier));
        assert!(CARRIERS.contains(&leg.carrier.as_str()));
    }

    #[test]
    fn fixed_fare_when_no_spread() {
        let pricer = SyntheticFlightPricer::new(1).with_fares(100.0, 0.0);
        assert_eq!(pricer.quote(&request("BCN", "ROM", 5)).price, 100.0);
    }

    #[tokio::test]
    async fn prices_whole_route_in_order() {
        let pricer = SyntheticFlightPricer::new(9);
        let route = vec![
            request("NYC", "BCN", 1),
            request("BCN", "ROM", 4),
            request("ROM", "NYC", 9),
        ];

        let legs = pricer.price_legs(&route, 10_000.0).await.unwrap();

        assert_eq!(legs.len(), 3);
        for (req, leg) in route.iter().zip(&legs) {
            assert!(req.matches(leg));
        }
    }

    #[tokio::test]
    async fn withholds_legs_over_ceiling() {
        let pricer = SyntheticFlightPricer::new(9).with_fares(150.0, 0.0);
        let route = vec![request("NYC", "BCN", 1), request("BCN", "NYC", 4)];

        let legs = pricer.price_legs(&route, 100.0).await.unwrap();
        assert!(legs.is_empty());
    }
}
