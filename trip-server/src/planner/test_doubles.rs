//! Pricing and weather doubles for planner tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use chrono::{NaiveDate, NaiveTime};

use crate::domain::{CityCode, FlightLeg, WeatherForecast};
use crate::pricing::{FlightPricingProvider, LegRequest, PricingError};
use crate::weather::{WeatherError, WeatherProvider};

pub fn flat_leg(request: &LegRequest, price: f64) -> FlightLeg {
    FlightLeg {
        from: request.origin,
        to: request.destination,
        departure_date: request.date,
        departure_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        arrival_date: request.date,
        arrival_time: NaiveTime::from_hms_opt(11, 30, 0).unwrap(),
        carrier: "IB".to_string(),
        flight_number: "IB1000".to_string(),
        price,
        duration: "2h 30m".to_string(),
    }
}

/// Prices every leg at the same fare and counts calls.
#[derive(Debug, Clone)]
pub struct FlatPricer {
    pub price: f64,
    pub calls: Arc<AtomicUsize>,
}

impl FlatPricer {
    pub fn new(price: f64) -> Self {
        Self {
            price,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl FlightPricingProvider for FlatPricer {
    async fn price_legs(
        &self,
        legs: &[LegRequest],
        _max_price: f64,
    ) -> Result<Vec<FlightLeg>, PricingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(legs.iter().map(|leg| flat_leg(leg, self.price)).collect())
    }
}

/// Always prices one leg fewer than requested.
#[derive(Debug, Clone, Default)]
pub struct ShortfallPricer {
    pub calls: Arc<AtomicUsize>,
}

impl FlightPricingProvider for ShortfallPricer {
    async fn price_legs(
        &self,
        legs: &[LegRequest],
        _max_price: f64,
    ) -> Result<Vec<FlightLeg>, PricingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(legs
            .iter()
            .take(legs.len().saturating_sub(1))
            .map(|leg| flat_leg(leg, 50.0))
            .collect())
    }
}

/// Prices the first leg as if it departed from somewhere else.
#[derive(Debug, Clone, Copy)]
pub struct WrongRoutePricer;

impl FlightPricingProvider for WrongRoutePricer {
    async fn price_legs(
        &self,
        legs: &[LegRequest],
        _max_price: f64,
    ) -> Result<Vec<FlightLeg>, PricingError> {
        let mut priced: Vec<FlightLeg> = legs.iter().map(|leg| flat_leg(leg, 50.0)).collect();
        if let Some(first) = priced.first_mut() {
            first.from = CityCode::parse("ZZZ").unwrap();
        }
        Ok(priced)
    }
}

/// Red-eye flights: every leg lands the day after it leaves.
#[derive(Debug, Clone, Copy)]
pub struct OvernightPricer;

impl FlightPricingProvider for OvernightPricer {
    async fn price_legs(
        &self,
        legs: &[LegRequest],
        _max_price: f64,
    ) -> Result<Vec<FlightLeg>, PricingError> {
        Ok(legs
            .iter()
            .map(|request| {
                let mut leg = flat_leg(request, 50.0);
                leg.departure_time = NaiveTime::from_hms_opt(22, 0, 0).unwrap();
                leg.arrival_date = request.date.succ_opt().unwrap();
                leg.arrival_time = NaiveTime::from_hms_opt(6, 30, 0).unwrap();
                leg.duration = "8h 30m".to_string();
                leg
            })
            .collect())
    }
}

/// Fails every call.
#[derive(Debug, Clone, Copy)]
pub struct FailingPricer;

impl FlightPricingProvider for FailingPricer {
    async fn price_legs(
        &self,
        _legs: &[LegRequest],
        _max_price: f64,
    ) -> Result<Vec<FlightLeg>, PricingError> {
        Err(PricingError::ApiError {
            status: 503,
            message: "unavailable".to_string(),
        })
    }
}

/// Sleeps before pricing routes through `slow_city`.
#[derive(Debug, Clone)]
pub struct SlowPricer {
    pub slow_city: CityCode,
    pub delay: Duration,
    pub price: f64,
}

impl FlightPricingProvider for SlowPricer {
    async fn price_legs(
        &self,
        legs: &[LegRequest],
        _max_price: f64,
    ) -> Result<Vec<FlightLeg>, PricingError> {
        if legs.iter().any(|leg| leg.destination == self.slow_city) {
            tokio::time::sleep(self.delay).await;
        }
        Ok(legs.iter().map(|leg| flat_leg(leg, self.price)).collect())
    }
}

/// Weather provider that is always down.
#[derive(Debug, Clone, Copy)]
pub struct FailingWeather;

impl WeatherProvider for FailingWeather {
    async fn forecast(
        &self,
        _city: CityCode,
        _date: NaiveDate,
    ) -> Result<WeatherForecast, WeatherError> {
        Err(WeatherError::Unavailable("offline".to_string()))
    }
}
