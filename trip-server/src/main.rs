use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use trip_server::cache::CachedFlightPricer;
use trip_server::catalog::ReferenceCatalog;
use trip_server::config::ServerConfig;
use trip_server::planner::Planner;
use trip_server::pricing::{
    HttpFlightPricer, PricingBackend, PricingClientConfig, SyntheticFlightPricer,
};
use trip_server::store::InMemoryStore;
use trip_server::weather::SeasonalWeather;
use trip_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,trip_server=debug")),
        )
        .init();

    let config = ServerConfig::from_env();

    // Load the destination catalog (fail fast if a configured file is bad)
    let catalog = match &config.catalog_path {
        Some(path) => {
            let catalog = ReferenceCatalog::load(path).expect("Failed to load catalog file");
            info!(path = %path.display(), "loaded catalog");
            catalog
        }
        None => ReferenceCatalog::builtin(),
    };
    info!(cities = catalog.all_cities().len(), "destination catalog ready");

    // Pick a pricing backend
    let backend = match &config.pricing_url {
        Some(url) => {
            let mut client_config =
                PricingClientConfig::new(url).with_timeout(config.planner.provider_timeout);
            match &config.pricing_api_key {
                Some(key) => client_config = client_config.with_api_key(key),
                None => warn!("TRIP_PRICING_API_KEY not set. Pricing calls may be refused."),
            }
            let client =
                HttpFlightPricer::new(client_config).expect("Failed to create pricing client");
            PricingBackend::Http(client)
        }
        None => PricingBackend::Synthetic(SyntheticFlightPricer::new(config.seed)),
    };
    info!(backend = backend.name(), "flight pricing configured");

    let pricer = CachedFlightPricer::new(backend, &config.cache);
    let planner = Planner::new(
        Arc::new(catalog),
        pricer,
        SeasonalWeather::new(config.seed),
        config.planner.clone(),
    );

    // Build app state and router
    let state = AppState::new(planner, InMemoryStore::new());
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind listen address");
    info!(addr = %config.bind_addr, "trip planner listening");
    info!("  POST   /api/v1/itineraries/search             - Start a search");
    info!("  GET    /api/v1/itineraries/search/:id         - Search results");
    info!("  GET    /api/v1/itineraries/search/:id/status  - Search status");
    info!("  DELETE /api/v1/itineraries/search/:id         - Cancel and delete");
    info!("  GET    /api/v1/itineraries/:id                - One itinerary");
    info!("  GET    /api/v1/itineraries/cheapest           - Five cheapest");
    info!("  GET    /api/v1/itineraries/budget/:max        - Within a budget");

    axum::serve(listener, app).await.expect("Server error");
}
