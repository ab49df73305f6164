//! Destination filtering.

use std::collections::BTreeSet;

use crate::catalog::ReferenceCatalog;
use crate::domain::{CityCode, SearchCriteria};

/// Narrow the catalog's cities to the candidates for a search.
///
/// Continent preferences pick the starting set (all continents when none
/// are given). Interest preferences can only narrow that set. The origin
/// and excluded cities are always removed. The result is ordered by code,
/// so enumeration downstream is reproducible; an empty result is not an
/// error.
pub fn candidate_destinations(
    catalog: &ReferenceCatalog,
    criteria: &SearchCriteria,
) -> Vec<CityCode> {
    let mut candidates: BTreeSet<CityCode> = if criteria.continents().is_empty() {
        catalog.all_cities()
    } else {
        criteria
            .continents()
            .iter()
            .flat_map(|continent| catalog.continent_cities(continent))
            .collect()
    };

    if !criteria.interests().is_empty() {
        let by_interest: BTreeSet<CityCode> = criteria
            .interests()
            .iter()
            .flat_map(|interest| catalog.interest_cities(interest))
            .collect();
        candidates.retain(|city| by_interest.contains(city));
    }

    candidates.remove(&criteria.origin());
    candidates.retain(|city| !criteria.excluded().contains(city));

    candidates.into_iter().collect()
}
