//! Itinerary types.
//!
//! An `Itinerary` is a complete round trip: the flight legs out of the
//! origin, between each visited city and back, the stays in between, and
//! what it all costs.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CityCode, DomainError, SearchId};

/// Identifier of a generated itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItineraryId(String);

impl ItineraryId {
    /// Generate a short random identifier (`itin-` plus 8 hex digits).
    pub fn generate() -> Self {
        let uuid = uuid::Uuid::new_v4().simple().to_string();
        Self(format!("itin-{}", &uuid[..8]))
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItineraryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single priced flight between two cities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightLeg {
    pub from: CityCode,
    pub to: CityCode,
    pub departure_date: NaiveDate,
    pub departure_time: NaiveTime,
    pub arrival_date: NaiveDate,
    pub arrival_time: NaiveTime,
    /// Carrier code, e.g. "IB"
    pub carrier: String,
    /// Carrier code plus number, e.g. "IB2041"
    pub flight_number: String,
    pub price: f64,
    /// Human-readable flight time, e.g. "2h 15m"
    pub duration: String,
}

impl FlightLeg {
    pub fn departure(&self) -> NaiveDateTime {
        self.departure_date.and_time(self.departure_time)
    }

    pub fn arrival(&self) -> NaiveDateTime {
        self.arrival_date.and_time(self.arrival_time)
    }
}

/// Forecast decoration for a city visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherForecast {
    /// Average temperature in degrees Celsius
    pub average_temp: i32,
    pub condition: String,
}

/// A stay in one city of an itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityVisit {
    pub code: CityCode,
    pub name: String,
    pub country: String,
    /// Nights spent in the city
    pub stay_days: u32,
    pub arrival_date: NaiveDate,
    pub departure_date: NaiveDate,
    pub highlights: Vec<String>,
    pub weather: Option<WeatherForecast>,
}

/// Where the money goes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetBreakdown {
    pub flights: f64,
    pub accommodation: f64,
    pub food: f64,
    pub total: f64,
    /// Search budget minus `total`
    pub remaining: f64,
}

/// A fully assembled, immutable round trip.
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    id: ItineraryId,
    search_id: SearchId,
    legs: Vec<FlightLeg>,
    cities: Vec<CityVisit>,
    budget: BudgetBreakdown,
    tips: Vec<String>,
    created_at: DateTime<Utc>,
}

impl Itinerary {
    /// Assemble an itinerary, checking that legs and visits line up.
    ///
    /// There must be exactly one more leg than visited cities, each leg must
    /// depart from where the previous one arrived, the last leg must return
    /// to the first leg's origin, and visit `i` must be the city leg `i`
    /// flies into.
    pub fn new(
        search_id: SearchId,
        legs: Vec<FlightLeg>,
        cities: Vec<CityVisit>,
        budget: BudgetBreakdown,
        tips: Vec<String>,
    ) -> Result<Self, DomainError> {
        if legs.len() != cities.len() + 1 {
            return Err(DomainError::LegCountMismatch {
                legs: legs.len(),
                cities: cities.len(),
            });
        }

        for pair in legs.windows(2) {
            if pair[0].to != pair[1].from {
                return Err(DomainError::BrokenChain(pair[0].to, pair[1].from));
            }
        }

        if let (Some(first), Some(last)) = (legs.first(), legs.last()) {
            if first.from != last.to {
                return Err(DomainError::NotRoundTrip(first.from, last.to));
            }
        }

        for (leg, visit) in legs.iter().zip(&cities) {
            if leg.to != visit.code {
                return Err(DomainError::VisitMismatch {
                    visit: visit.code,
                    leg: leg.to,
                });
            }
        }

        Ok(Self {
            id: ItineraryId::generate(),
            search_id,
            legs,
            cities,
            budget,
            tips,
            created_at: Utc::now(),
        })
    }

    pub fn id(&self) -> &ItineraryId {
        &self.id
    }

    pub fn search_id(&self) -> &SearchId {
        &self.search_id
    }

    pub fn legs(&self) -> &[FlightLeg] {
        &self.legs
    }

    pub fn cities(&self) -> &[CityVisit] {
        &self.cities
    }

    pub fn budget(&self) -> &BudgetBreakdown {
        &self.budget
    }

    pub fn tips(&self) -> &[String] {
        &self.tips
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Total price, identical to the breakdown's grand total.
    pub fn total_price(&self) -> f64 {
        self.budget.total
    }

    /// Days spent across all visited cities.
    pub fn total_days(&self) -> u32 {
        self.cities.iter().map(|c| c.stay_days).sum()
    }

    /// The city the trip starts and ends in.
    pub fn origin(&self) -> CityCode {
        // `new` guarantees at least one leg.
        self.legs[0].from
    }

    /// Visited city codes in order.
    pub fn route(&self) -> Vec<CityCode> {
        self.cities.iter().map(|c| c.code).collect()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn code(s: &str) -> CityCode {
        CityCode::parse(s).unwrap()
    }

    pub fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    pub fn leg(from: &str, to: &str, day: u32, price: f64) -> FlightLeg {
        FlightLeg {
            from: code(from),
            to: code(to),
            departure_date: date(day),
            departure_time: NaiveTime::from_hms_opt(8, 30, 0).unwrap(),
            arrival_date: date(day),
            arrival_time: NaiveTime::from_hms_opt(10, 15, 0).unwrap(),
            carrier: "IB".to_string(),
            flight_number: "IB1234".to_string(),
            price,
            duration: "1h 45m".to_string(),
        }
    }

    pub fn visit(city: &str, arrive: u32, stay: u32) -> CityVisit {
        CityVisit {
            code: code(city),
            name: city.to_string(),
            country: "Somewhere".to_string(),
            stay_days: stay,
            arrival_date: date(arrive),
            departure_date: date(arrive + stay),
            highlights: vec![],
            weather: None,
        }
    }

    pub fn breakdown(total: f64, budget: f64) -> BudgetBreakdown {
        BudgetBreakdown {
            flights: total,
            accommodation: 0.0,
            food: 0.0,
            total,
            remaining: budget - total,
        }
    }
}
