//! Domain error types.
//!
//! These errors represent validation failures and data inconsistencies
//! in the domain layer. They are distinct from provider/IO errors.

use super::{CityCode, InvalidCityCode};

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// A city code failed to parse
    #[error(transparent)]
    InvalidCode(#[from] InvalidCityCode),

    /// Search criteria violate a basic constraint
    #[error("invalid search criteria: {0}")]
    InvalidCriteria(&'static str),

    /// Itinerary has the wrong number of legs for its cities
    #[error("itinerary has {legs} legs for {cities} cities (expected cities + 1)")]
    LegCountMismatch { legs: usize, cities: usize },

    /// Consecutive legs don't share an endpoint
    #[error("leg arriving at {0} is followed by a leg departing {1}")]
    BrokenChain(CityCode, CityCode),

    /// The trip doesn't return to where it started
    #[error("itinerary starts at {0} but returns to {1}")]
    NotRoundTrip(CityCode, CityCode),

    /// A city visit doesn't match the leg that flies into it
    #[error("city visit {visit} does not match leg arriving at {leg}")]
    VisitMismatch { visit: CityCode, leg: CityCode },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DomainError::InvalidCriteria("budget must be positive");
        assert_eq!(
            err.to_string(),
            "invalid search criteria: budget must be positive"
        );

        let err = DomainError::LegCountMismatch { legs: 2, cities: 2 };
        assert_eq!(
            err.to_string(),
            "itinerary has 2 legs for 2 cities (expected cities + 1)"
        );

        let a = CityCode::parse("BCN").unwrap();
        let b = CityCode::parse("MAD").unwrap();
        let err = DomainError::BrokenChain(a, b);
        assert_eq!(
            err.to_string(),
            "leg arriving at BCN is followed by a leg departing MAD"
        );

        let err: DomainError = CityCode::parse("bcn").unwrap_err().into();
        assert!(err.to_string().contains("invalid city code"));
    }
}
