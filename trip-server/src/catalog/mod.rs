//! Reference data about destinations.
//!
//! The catalog maps city codes to display data and groups cities by
//! continent and by traveller interest. It is read-only once built, so a
//! single instance is shared (behind an `Arc`) by every generation run.
//!
//! Continent and interest names are matched case-insensitively. Unknown
//! keys yield empty sets and unknown cities yield an "Unknown" placeholder;
//! lookups never fail.

mod builtin;

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::CityCode;

/// Display data for a city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityInfo {
    pub name: String,
    pub country: String,
    #[serde(default)]
    pub highlights: Vec<String>,
}

impl CityInfo {
    /// Placeholder returned for codes the catalog doesn't know.
    pub fn unknown() -> Self {
        Self {
            name: "Unknown City".to_string(),
            country: "Unknown Country".to_string(),
            highlights: Vec::new(),
        }
    }
}

/// Errors loading a catalog from disk.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog: {0}")]
    Json(#[from] serde_json::Error),
}

/// On-disk catalog layout.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    cities: HashMap<CityCode, CityInfo>,
    #[serde(default)]
    continents: HashMap<String, Vec<CityCode>>,
    #[serde(default)]
    interests: HashMap<String, Vec<CityCode>>,
}

/// Read-only destination universe and preference taxonomy.
#[derive(Debug, Clone, Default)]
pub struct ReferenceCatalog {
    cities: HashMap<CityCode, CityInfo>,
    continents: BTreeMap<String, BTreeSet<CityCode>>,
    interests: BTreeMap<String, BTreeSet<CityCode>>,
}

impl ReferenceCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in data set.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();

        for (code, name, country, highlights) in builtin::CITIES {
            let Ok(code) = CityCode::parse(code) else {
                continue;
            };
            catalog.add_city(
                code,
                CityInfo {
                    name: (*name).to_string(),
                    country: (*country).to_string(),
                    highlights: highlights.iter().map(|h| (*h).to_string()).collect(),
                },
            );
        }

        for (continent, codes) in builtin::CONTINENTS {
            catalog.add_continent(*continent, codes.iter().filter_map(|c| CityCode::parse(c).ok()));
        }

        for (interest, codes) in builtin::INTERESTS {
            catalog.add_interest(*interest, codes.iter().filter_map(|c| CityCode::parse(c).ok()));
        }

        catalog
    }

    /// Parse a catalog from JSON.
    ///
    /// ```json
    /// {
    ///   "cities": { "BCN": { "name": "Barcelona", "country": "Spain", "highlights": [] } },
    ///   "continents": { "Europe": ["BCN"] },
    ///   "interests": { "beach": ["BCN"] }
    /// }
    /// ```
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        let mut catalog = Self::new();

        for (code, info) in file.cities {
            catalog.add_city(code, info);
        }
        for (continent, codes) in file.continents {
            catalog.add_continent(&continent, codes);
        }
        for (interest, codes) in file.interests {
            catalog.add_interest(&interest, codes);
        }

        let unnamed = catalog
            .all_cities()
            .into_iter()
            .filter(|c| !catalog.cities.contains_key(c))
            .count();
        if unnamed > 0 {
            warn!(unnamed, "catalog groups reference cities without display data");
        }

        Ok(catalog)
    }

    /// Load a catalog from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Add or replace display data for a city.
    pub fn add_city(&mut self, code: CityCode, info: CityInfo) {
        self.cities.insert(code, info);
    }

    /// Add cities to a continent.
    pub fn add_continent(&mut self, continent: &str, codes: impl IntoIterator<Item = CityCode>) {
        self.continents
            .entry(normalize_key(continent))
            .or_default()
            .extend(codes);
    }

    /// Add cities to an interest.
    pub fn add_interest(&mut self, interest: &str, codes: impl IntoIterator<Item = CityCode>) {
        self.interests
            .entry(normalize_key(interest))
            .or_default()
            .extend(codes);
    }

    /// Display data for a city, or the "Unknown" placeholder.
    pub fn city_info(&self, code: &CityCode) -> CityInfo {
        self.cities
            .get(code)
            .cloned()
            .unwrap_or_else(CityInfo::unknown)
    }

    /// Cities on a continent (empty if the continent is unknown).
    pub fn continent_cities(&self, continent: &str) -> BTreeSet<CityCode> {
        self.continents
            .get(&normalize_key(continent))
            .cloned()
            .unwrap_or_default()
    }

    /// Cities matching an interest (empty if the interest is unknown).
    pub fn interest_cities(&self, interest: &str) -> BTreeSet<CityCode> {
        self.interests
            .get(&normalize_key(interest))
            .cloned()
            .unwrap_or_default()
    }

    /// Every city listed under some continent.
    pub fn all_cities(&self) -> BTreeSet<CityCode> {
        self.continents.values().flatten().copied().collect()
    }

    /// Known continent names (normalized).
    pub fn continents(&self) -> impl Iterator<Item = &str> {
        self.continents.keys().map(String::as_str)
    }

    /// Known interest names (normalized).
    pub fn interests(&self) -> impl Iterator<Item = &str> {
        self.interests.keys().map(String::as_str)
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}
