//! Search criteria and identifiers.

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{CityCode, DomainError};

/// Identifier of a submitted search.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchId(String);

impl SearchId {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Wrap an existing identifier (e.g. one taken from a URL).
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a traveller asked for.
///
/// Validated at construction and immutable afterwards; the preference
/// sets can only be attached through the consuming `with_*` methods.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchCriteria {
    id: SearchId,
    origin: CityCode,
    departure_date: NaiveDate,
    return_date: NaiveDate,
    budget: f64,
    city_count: usize,
    min_days_per_city: u32,
    max_days_per_city: u32,
    continents: BTreeSet<String>,
    interests: BTreeSet<String>,
    excluded: BTreeSet<CityCode>,
}

impl SearchCriteria {
    /// Create validated search criteria with no preferences.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: SearchId,
        origin: CityCode,
        departure_date: NaiveDate,
        return_date: NaiveDate,
        budget: f64,
        city_count: usize,
        min_days_per_city: u32,
        max_days_per_city: u32,
    ) -> Result<Self, DomainError> {
        if return_date <= departure_date {
            return Err(DomainError::InvalidCriteria(
                "return date must be after departure date",
            ));
        }
        if !(budget.is_finite() && budget > 0.0) {
            return Err(DomainError::InvalidCriteria("budget must be positive"));
        }
        if city_count == 0 {
            return Err(DomainError::InvalidCriteria(
                "number of cities must be at least 1",
            ));
        }
        if min_days_per_city == 0 {
            return Err(DomainError::InvalidCriteria(
                "minimum days per city must be at least 1",
            ));
        }
        if min_days_per_city > max_days_per_city {
            return Err(DomainError::InvalidCriteria(
                "minimum days per city exceeds maximum",
            ));
        }

        Ok(Self {
            id,
            origin,
            departure_date,
            return_date,
            budget,
            city_count,
            min_days_per_city,
            max_days_per_city,
            continents: BTreeSet::new(),
            interests: BTreeSet::new(),
            excluded: BTreeSet::new(),
        })
    }

    /// Restrict candidates to these continents.
    pub fn with_continents<I, S>(mut self, continents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.continents = continents.into_iter().map(Into::into).collect();
        self
    }

    /// Narrow candidates to cities matching any of these interests.
    pub fn with_interests<I, S>(mut self, interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interests = interests.into_iter().map(Into::into).collect();
        self
    }

    /// Never visit these cities.
    pub fn with_exclusions(mut self, excluded: impl IntoIterator<Item = CityCode>) -> Self {
        self.excluded = excluded.into_iter().collect();
        self
    }

    pub fn id(&self) -> &SearchId {
        &self.id
    }

    pub fn origin(&self) -> CityCode {
        self.origin
    }

    pub fn departure_date(&self) -> NaiveDate {
        self.departure_date
    }

    pub fn return_date(&self) -> NaiveDate {
        self.return_date
    }

    pub fn budget(&self) -> f64 {
        self.budget
    }

    pub fn city_count(&self) -> usize {
        self.city_count
    }

    pub fn min_days_per_city(&self) -> u32 {
        self.min_days_per_city
    }

    pub fn max_days_per_city(&self) -> u32 {
        self.max_days_per_city
    }

    pub fn continents(&self) -> &BTreeSet<String> {
        &self.continents
    }

    pub fn interests(&self) -> &BTreeSet<String> {
        &self.interests
    }

    pub fn excluded(&self) -> &BTreeSet<CityCode> {
        &self.excluded
    }

    /// Whole days between departure and return.
    pub fn total_days(&self) -> u32 {
        let days = self
            .return_date
            .signed_duration_since(self.departure_date)
            .num_days();
        u32::try_from(days).unwrap_or(0)
    }

    /// True when the trip is too short to give every city its minimum stay.
    pub fn is_infeasible(&self) -> bool {
        let needed = u64::from(self.min_days_per_city) * self.city_count as u64;
        u64::from(self.total_days()) < needed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    fn code(s: &str) -> CityCode {
        CityCode::parse(s).unwrap()
    }

    fn criteria(budget: f64, cities: usize, min: u32, max: u32) -> Result<SearchCriteria, DomainError> {
        SearchCriteria::new(
            SearchId::new("s1"),
            code("NYC"),
            date(1),
            date(11),
            budget,
            cities,
            min,
            max,
        )
    }

    #[test]
    fn valid_criteria() {
        let c = criteria(1500.0, 2, 2, 5).unwrap();
        assert_eq!(c.total_days(), 10);
        assert_eq!(c.origin(), code("NYC"));
        assert!(!c.is_infeasible());
        assert!(c.continents().is_empty());
    }

    #[test]
    fn rejects_bad_budget() {
        assert!(criteria(0.0, 2, 2, 5).is_err());
        assert!(criteria(-10.0, 2, 2, 5).is_err());
        assert!(criteria(f64::NAN, 2, 2, 5).is_err());
    }

    #[test]
    fn rejects_bad_city_count_and_stays() {
        assert!(criteria(1000.0, 0, 2, 5).is_err());
        assert!(criteria(1000.0, 2, 0, 5).is_err());
        assert_eq!(
            criteria(1000.0, 2, 6, 5).unwrap_err(),
            DomainError::InvalidCriteria("minimum days per city exceeds maximum")
        );
    }

    #[test]
    fn rejects_return_before_departure() {
        let result = SearchCriteria::new(
            SearchId::new("s1"),
            code("NYC"),
            date(10),
            date(10),
            1000.0,
            1,
            1,
            3,
        );
        assert!(result.is_err());
    }

    #[test]
    fn infeasible_when_trip_too_short() {
        // 10 days, 3 cities x 4 days minimum
        let c = criteria(1000.0, 3, 4, 6).unwrap();
        assert!(c.is_infeasible());
    }

    #[test]
    fn preferences_attach() {
        let c = criteria(1000.0, 2, 2, 5)
            .unwrap()
            .with_continents(["Europe"])
            .with_interests(vec!["food".to_string(), "beach".to_string()])
            .with_exclusions([code("PAR")]);

        assert!(c.continents().contains("Europe"));
        assert_eq!(c.interests().len(), 2);
        assert!(c.excluded().contains(&code("PAR")));
    }

    #[test]
    fn generated_ids_differ() {
        assert_ne!(SearchId::generate(), SearchId::generate());
    }
}
