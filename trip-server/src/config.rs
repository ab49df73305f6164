//! Server configuration from the environment.
//!
//! Every setting has a default. A variable that is set but doesn't parse is
//! reported and ignored rather than stopping the server.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::cache::CacheConfig;
use crate::planner::PlannerConfig;

/// Everything the binary needs to start.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (`TRIP_BIND_ADDR`)
    pub bind_addr: SocketAddr,

    /// Catalog file replacing the built-in data (`TRIP_CATALOG_PATH`)
    pub catalog_path: Option<PathBuf>,

    /// Pricing endpoint; synthetic fares when unset (`TRIP_PRICING_URL`)
    pub pricing_url: Option<String>,

    /// `TRIP_PRICING_API_KEY`
    pub pricing_api_key: Option<String>,

    /// Seed for synthetic fares, weather and tips (`TRIP_SEED`)
    pub seed: u64,

    pub planner: PlannerConfig,

    pub cache: CacheConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            catalog_path: None,
            pricing_url: None,
            pricing_api_key: None,
            seed: 0,
            planner: PlannerConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Read the `TRIP_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let planner = defaults.planner;
        let seed = parsed(&lookup, "TRIP_SEED", defaults.seed);

        let planner = PlannerConfig::new(
            parsed(&lookup, "TRIP_ACCOMMODATION_RATE", planner.accommodation_rate),
            parsed(&lookup, "TRIP_FOOD_RATE", planner.food_rate),
            parsed(&lookup, "TRIP_MAX_RESULTS", planner.max_results),
            parsed(&lookup, "TRIP_MAX_PER_COMBINATION", planner.max_per_combination),
        )
        .with_max_concurrent(parsed(&lookup, "TRIP_MAX_CONCURRENT", planner.max_concurrent))
        .with_provider_timeout(Duration::from_secs(parsed(
            &lookup,
            "TRIP_PROVIDER_TIMEOUT_SECS",
            planner.provider_timeout.as_secs(),
        )))
        .with_seed(seed);

        let cache = CacheConfig {
            ttl: Duration::from_secs(parsed(
                &lookup,
                "TRIP_CACHE_TTL_SECS",
                defaults.cache.ttl.as_secs(),
            )),
            ..defaults.cache
        };

        Self {
            bind_addr: parsed(&lookup, "TRIP_BIND_ADDR", defaults.bind_addr),
            catalog_path: non_empty(&lookup, "TRIP_CATALOG_PATH").map(PathBuf::from),
            pricing_url: non_empty(&lookup, "TRIP_PRICING_URL"),
            pricing_api_key: non_empty(&lookup, "TRIP_PRICING_API_KEY"),
            seed,
            planner,
            cache,
        }
    }
}

fn non_empty(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key).filter(|value| !value.trim().is_empty())
}

fn parsed<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Debug,
{
    let Some(raw) = non_empty(lookup, key) else {
        return default;
    };
    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            warn!(key, value = %raw, ?default, "unparsable setting, using default");
            default
        }
    }
}
