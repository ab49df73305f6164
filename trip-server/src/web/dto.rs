//! Data transfer objects for web requests and responses.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    BudgetBreakdown, CityCode, CityVisit, DomainError, FlightLeg, Itinerary, SearchCriteria,
    SearchId,
};
use crate::tasks::SearchStatus;

/// Request to start an itinerary search.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    /// IATA code of the home city
    pub origin: String,

    pub departure_date: NaiveDate,

    pub return_date: NaiveDate,

    /// Total budget for flights, accommodation and food
    pub budget: f64,

    /// How many cities to visit
    pub number_of_cities: usize,

    /// Defaults to 1
    pub min_days_per_city: Option<u32>,

    /// Defaults to the whole trip
    pub max_days_per_city: Option<u32>,

    #[serde(default)]
    pub preferences: Preferences,
}

/// Optional destination preferences.
#[derive(Debug, Default, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub continent: Vec<String>,

    #[serde(default)]
    pub interests: Vec<String>,

    /// IATA codes never to visit
    #[serde(default)]
    pub excluded_destinations: Vec<String>,
}

impl SearchRequest {
    /// Validate the request into search criteria.
    pub fn into_criteria(self, id: SearchId) -> Result<SearchCriteria, DomainError> {
        if self.budget < 1.0 {
            return Err(DomainError::InvalidCriteria("budget must be at least 1"));
        }

        let origin = CityCode::parse_normalized(&self.origin)?;
        let excluded = self
            .preferences
            .excluded_destinations
            .iter()
            .map(|code| CityCode::parse_normalized(code))
            .collect::<Result<Vec<_>, _>>()?;

        let trip_days = (self.return_date - self.departure_date).num_days().max(1);
        let trip_days = u32::try_from(trip_days).unwrap_or(u32::MAX);

        let criteria = SearchCriteria::new(
            id,
            origin,
            self.departure_date,
            self.return_date,
            self.budget,
            self.number_of_cities,
            self.min_days_per_city.unwrap_or(1),
            self.max_days_per_city.unwrap_or(trip_days),
        )?;

        Ok(criteria
            .with_continents(self.preferences.continent)
            .with_interests(self.preferences.interests)
            .with_exclusions(excluded))
    }
}

/// Response to a started search.
#[derive(Debug, Serialize)]
pub struct SearchCreatedResponse {
    pub search_id: SearchId,
    pub message: String,
}

/// Where a search's generation run is.
#[derive(Debug, Serialize)]
pub struct SearchStatusResponse {
    pub search_id: SearchId,

    #[serde(flatten)]
    pub status: SearchStatus,
}

/// An itinerary in responses.
#[derive(Debug, Serialize)]
pub struct ItineraryResult {
    pub id: String,
    pub search_id: SearchId,
    pub legs: Vec<FlightLeg>,
    pub cities: Vec<CityVisit>,
    pub budget: BudgetBreakdown,
    pub tips: Vec<String>,
    pub total_price: f64,
    pub total_days: u32,
    pub created_at: DateTime<Utc>,
}

impl ItineraryResult {
    pub fn from_itinerary(itinerary: &Itinerary) -> Self {
        Self {
            id: itinerary.id().to_string(),
            search_id: itinerary.search_id().clone(),
            legs: itinerary.legs().to_vec(),
            cities: itinerary.cities().to_vec(),
            budget: *itinerary.budget(),
            tips: itinerary.tips().to_vec(),
            total_price: itinerary.total_price(),
            total_days: itinerary.total_days(),
            created_at: itinerary.created_at(),
        }
    }

    pub fn from_all(itineraries: &[Itinerary]) -> Vec<Self> {
        itineraries.iter().map(Self::from_itinerary).collect()
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
