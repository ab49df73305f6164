//! Itinerary assembly.
//!
//! Turns one city combination and one day distribution into a priced,
//! decorated itinerary: lay out the legs and their dates, price them in one
//! provider call, build the visits from the leg schedule and the catalog,
//! then cost the trip and pick tips.

use chrono::{Days, NaiveDate};
use rand::seq::SliceRandom;
use tracing::{debug, trace};

use crate::catalog::ReferenceCatalog;
use crate::domain::{
    BudgetBreakdown, CityCode, CityVisit, FlightLeg, Itinerary, SearchCriteria,
};
use crate::pricing::{FlightPricingProvider, LegRequest, PricingError};
use crate::seed::rng_for;
use crate::weather::WeatherProvider;

use super::budget;
use super::config::PlannerConfig;
use super::error::BranchRejection;

/// Lay out the legs of a round trip.
///
/// The first leg leaves the origin on the departure date; every later leg
/// leaves the previous city once its allotted stay is over.
pub fn leg_requests(
    origin: CityCode,
    departure: NaiveDate,
    cities: &[CityCode],
    days: &[u32],
) -> Result<Vec<LegRequest>, BranchRejection> {
    if cities.len() != days.len() || cities.is_empty() {
        return Err(BranchRejection::Fault(format!(
            "{} cities but {} stay lengths",
            cities.len(),
            days.len()
        )));
    }

    let stops: Vec<CityCode> = std::iter::once(origin)
        .chain(cities.iter().copied())
        .chain(std::iter::once(origin))
        .collect();

    let mut requests = Vec::with_capacity(stops.len() - 1);
    let mut date = departure;

    for (i, hop) in stops.windows(2).enumerate() {
        if i > 0 {
            date = add_days(date, days[i - 1])?;
        }
        requests.push(LegRequest::new(hop[0], hop[1], date));
    }

    Ok(requests)
}

fn add_days(date: NaiveDate, days: u32) -> Result<NaiveDate, BranchRejection> {
    date.checked_add_days(Days::new(u64::from(days)))
        .ok_or_else(|| BranchRejection::Fault(format!("date overflow adding {days} days to {date}")))
}

/// Builds itineraries from the catalog and the pricing/weather providers.
pub struct Assembler<'a, P, W> {
    catalog: &'a ReferenceCatalog,
    pricer: &'a P,
    weather: &'a W,
    config: &'a PlannerConfig,
}

impl<'a, P: FlightPricingProvider, W: WeatherProvider> Assembler<'a, P, W> {
    pub fn new(
        catalog: &'a ReferenceCatalog,
        pricer: &'a P,
        weather: &'a W,
        config: &'a PlannerConfig,
    ) -> Self {
        Self {
            catalog,
            pricer,
            weather,
            config,
        }
    }

    /// Assemble one branch.
    ///
    /// Every failure here is a rejection of this branch only. The budget is
    /// computed but not enforced; that is the caller's evaluation step.
    pub async fn assemble(
        &self,
        criteria: &SearchCriteria,
        cities: &[CityCode],
        days: &[u32],
        tip_seed: u64,
    ) -> Result<Itinerary, BranchRejection> {
        let requests = leg_requests(criteria.origin(), criteria.departure_date(), cities, days)?;

        let legs = self.price(&requests, criteria.budget()).await?;

        // Stays follow the leg schedule, so a visit ends the day the next leg
        // leaves even when the inbound flight lands after midnight.
        let mut visits = Vec::with_capacity(cities.len());
        for (i, (&code, &stay)) in cities.iter().zip(days).enumerate() {
            let arrival = requests[i].date;
            let departure = requests[i + 1].date;
            visits.push(self.visit(code, stay, arrival, departure).await);
        }

        let stay_days = days.iter().sum();
        let breakdown = budget::evaluate(&legs, stay_days, criteria.budget(), self.config);
        let tips = self.tips(&legs, &visits, &breakdown, tip_seed);

        Itinerary::new(criteria.id().clone(), legs, visits, breakdown, tips)
            .map_err(|e| BranchRejection::Fault(e.to_string()))
    }

    /// Price the whole route, insisting on one matching leg per request.
    async fn price(
        &self,
        requests: &[LegRequest],
        ceiling: f64,
    ) -> Result<Vec<FlightLeg>, BranchRejection> {
        let timeout = self.config.provider_timeout;
        let legs = tokio::time::timeout(timeout, self.pricer.price_legs(requests, ceiling))
            .await
            .map_err(|_| PricingError::Timeout(timeout))??;

        if legs.len() != requests.len() {
            return Err(BranchRejection::ProviderShortfall {
                requested: requests.len(),
                returned: legs.len(),
            });
        }

        if let Some(index) = requests
            .iter()
            .zip(&legs)
            .position(|(request, leg)| !request.matches(leg))
        {
            return Err(BranchRejection::LegMismatch { index });
        }

        trace!(legs = legs.len(), "route priced");
        Ok(legs)
    }

    async fn visit(
        &self,
        code: CityCode,
        stay_days: u32,
        arrival_date: NaiveDate,
        departure_date: NaiveDate,
    ) -> CityVisit {
        let info = self.catalog.city_info(&code);

        let weather = match self.weather.forecast(code, arrival_date).await {
            Ok(forecast) => Some(forecast),
            Err(e) => {
                debug!(city = %code, error = %e, "no forecast");
                None
            }
        };

        CityVisit {
            code,
            name: info.name,
            country: info.country,
            stay_days,
            arrival_date,
            departure_date,
            highlights: info.highlights,
            weather,
        }
    }

    /// Up to `max_tips` qualifying tips, in a seeded random order.
    fn tips(
        &self,
        legs: &[FlightLeg],
        visits: &[CityVisit],
        breakdown: &BudgetBreakdown,
        seed: u64,
    ) -> Vec<String> {
        let mut tips = Vec::new();

        if legs.len() > 2 {
            if let Some(first) = visits.first() {
                tips.push(format!(
                    "Booking accommodation in {} 1 week earlier could save ~€30",
                    first.name
                ));
            }
        }
        if breakdown.total > self.config.tip_total_threshold {
            tips.push(
                "Flying on Tuesday instead of Thursday could reduce the return flight cost by ~€20"
                    .to_string(),
            );
        }
        if breakdown.accommodation > self.config.tip_accommodation_threshold {
            tips.push("Staying in hostels instead of hotels could save ~€50".to_string());
        }
        if legs.len() >= 3 {
            tips.push(
                "Booking all flights together as a multi-city package could reduce total flight costs by ~€25"
                    .to_string(),
            );
        }

        let mut rng = rng_for(seed, &[b"tips"]);
        tips.shuffle(&mut rng);
        tips.truncate(self.config.max_tips);
        tips
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SearchId;
    use crate::domain::test_support::{code, date};
    use crate::planner::test_doubles::*;
    use crate::pricing::SyntheticFlightPricer;
    use crate::weather::{NoWeather, SeasonalWeather};
    use std::time::Duration;

    fn criteria(budget: f64) -> SearchCriteria {
        SearchCriteria::new(
            SearchId::new("s1"),
            code("NYC"),
            date(1),
            date(11),
            budget,
            2,
            2,
            5,
        )
        .unwrap()
    }

    #[test]
    fn lays_out_leg_dates() {
        let requests =
            leg_requests(code("NYC"), date(1), &[code("BCN"), code("ROM")], &[3, 5]).unwrap();

        let summary: Vec<(String, String, u32)> = requests
            .iter()
            .map(|r| {
                (
                    r.origin.to_string(),
                    r.destination.to_string(),
                    chrono::Datelike::day(&r.date),
                )
            })
            .collect();

        assert_eq!(
            summary,
            vec![
                ("NYC".into(), "BCN".into(), 1),
                ("BCN".into(), "ROM".into(), 4),
                ("ROM".into(), "NYC".into(), 9),
            ]
        );
    }

    #[test]
    fn mismatched_days_is_a_fault() {
        let result = leg_requests(code("NYC"), date(1), &[code("BCN")], &[3, 5]);
        assert!(matches!(result, Err(BranchRejection::Fault(_))));
    }

    #[tokio::test]
    async fn assembles_round_trip() {
        let catalog = ReferenceCatalog::builtin();
        let pricer = FlatPricer::new(100.0);
        let config = PlannerConfig::default();
        let assembler = Assembler::new(&catalog, &pricer, &NoWeather, &config);

        let itinerary = assembler
            .assemble(&criteria(1500.0), &[code("BCN"), code("ROM")], &[5, 5], 7)
            .await
            .unwrap();

        assert_eq!(itinerary.legs().len(), 3);
        assert_eq!(itinerary.route(), vec![code("BCN"), code("ROM")]);
        assert_eq!(itinerary.total_days(), 10);

        let bcn = &itinerary.cities()[0];
        assert_eq!(bcn.name, "Barcelona");
        assert_eq!(bcn.arrival_date, date(1));
        assert_eq!(bcn.departure_date, date(6));
        assert!(bcn.weather.is_none());

        let b = itinerary.budget();
        assert_eq!(b.flights, 300.0);
        assert_eq!(b.total, 300.0 + 500.0 + 200.0);
        assert_eq!(b.remaining, 500.0);

        assert!(itinerary.tips().len() <= 2);
        assert_eq!(pricer.calls(), 1);
    }

    #[tokio::test]
    async fn overnight_legs_keep_stays_on_schedule() {
        let catalog = ReferenceCatalog::builtin();
        let config = PlannerConfig::default();
        let assembler = Assembler::new(&catalog, &OvernightPricer, &NoWeather, &config);

        let itinerary = assembler
            .assemble(&criteria(1500.0), &[code("BCN"), code("ROM")], &[5, 5], 7)
            .await
            .unwrap();

        let legs = itinerary.legs();
        for (i, visit) in itinerary.cities().iter().enumerate() {
            assert_eq!(visit.arrival_date, legs[i].departure_date);
            assert_eq!(visit.departure_date, legs[i + 1].departure_date);
        }
        assert_eq!(itinerary.cities()[0].departure_date, date(6));
        assert_eq!(itinerary.cities()[1].arrival_date, date(6));
    }

    #[tokio::test]
    async fn weather_decorates_visits() {
        let catalog = ReferenceCatalog::builtin();
        let pricer = SyntheticFlightPricer::new(1);
        let weather = SeasonalWeather::new(1);
        let config = PlannerConfig::default();
        let assembler = Assembler::new(&catalog, &pricer, &weather, &config);

        let itinerary = assembler
            .assemble(&criteria(5000.0), &[code("BCN"), code("ROM")], &[5, 5], 7)
            .await
            .unwrap();

        assert!(itinerary.cities().iter().all(|c| c.weather.is_some()));
    }

    #[tokio::test]
    async fn weather_failure_never_blocks() {
        let catalog = ReferenceCatalog::builtin();
        let pricer = FlatPricer::new(100.0);
        let config = PlannerConfig::default();
        let assembler = Assembler::new(&catalog, &pricer, &FailingWeather, &config);

        let itinerary = assembler
            .assemble(&criteria(1500.0), &[code("BCN"), code("ROM")], &[5, 5], 7)
            .await
            .unwrap();

        assert!(itinerary.cities().iter().all(|c| c.weather.is_none()));
    }

    #[tokio::test]
    async fn shortfall_rejects() {
        let catalog = ReferenceCatalog::builtin();
        let pricer = ShortfallPricer::default();
        let config = PlannerConfig::default();
        let assembler = Assembler::new(&catalog, &pricer, &NoWeather, &config);

        let result = assembler
            .assemble(&criteria(1500.0), &[code("BCN"), code("ROM")], &[5, 5], 7)
            .await;

        assert!(matches!(
            result,
            Err(BranchRejection::ProviderShortfall {
                requested: 3,
                returned: 2
            })
        ));
    }

    #[tokio::test]
    async fn wrong_route_rejects() {
        let catalog = ReferenceCatalog::builtin();
        let config = PlannerConfig::default();
        let assembler = Assembler::new(&catalog, &WrongRoutePricer, &NoWeather, &config);

        let result = assembler
            .assemble(&criteria(1500.0), &[code("BCN")], &[5], 7)
            .await;

        assert!(matches!(result, Err(BranchRejection::LegMismatch { index: 0 })));
    }

    #[tokio::test]
    async fn provider_error_rejects() {
        let catalog = ReferenceCatalog::builtin();
        let config = PlannerConfig::default();
        let assembler = Assembler::new(&catalog, &FailingPricer, &NoWeather, &config);

        let result = assembler
            .assemble(&criteria(1500.0), &[code("BCN")], &[5], 7)
            .await;

        assert!(matches!(result, Err(BranchRejection::Provider(_))));
    }

    #[tokio::test]
    async fn slow_provider_times_out() {
        let catalog = ReferenceCatalog::builtin();
        let pricer = SlowPricer {
            slow_city: code("BCN"),
            delay: Duration::from_secs(5),
            price: 10.0,
        };
        let config = PlannerConfig::default().with_provider_timeout(Duration::from_millis(20));
        let assembler = Assembler::new(&catalog, &pricer, &NoWeather, &config);

        let result = assembler
            .assemble(&criteria(1500.0), &[code("BCN")], &[5], 7)
            .await;

        assert!(matches!(
            result,
            Err(BranchRejection::Provider(PricingError::Timeout(_)))
        ));
    }

    #[tokio::test]
    async fn tips_are_seeded_and_capped() {
        let catalog = ReferenceCatalog::builtin();
        // Expensive enough to qualify for all four tips.
        let pricer = FlatPricer::new(400.0);
        let config = PlannerConfig::default();
        let assembler = Assembler::new(&catalog, &pricer, &NoWeather, &config);
        let search = criteria(5000.0);
        let route = [code("BCN"), code("ROM")];

        let a = assembler.assemble(&search, &route, &[5, 5], 42).await.unwrap();
        let b = assembler.assemble(&search, &route, &[5, 5], 42).await.unwrap();

        assert_eq!(a.tips().len(), 2);
        assert_eq!(a.tips(), b.tips());
        assert_eq!(a.total_price(), b.total_price());
    }

    #[tokio::test]
    async fn cheap_short_trip_gets_no_tips() {
        let catalog = ReferenceCatalog::builtin();
        let pricer = FlatPricer::new(10.0);
        let config = PlannerConfig::default();
        let assembler = Assembler::new(&catalog, &pricer, &NoWeather, &config);

        let itinerary = assembler
            .assemble(&criteria(1500.0), &[code("BCN")], &[2], 1)
            .await
            .unwrap();

        assert!(itinerary.tips().is_empty());
    }
}
