//! HTTP flight pricing client.
//!
//! Posts a multi-city route to a JSON fare-search endpoint and converts the
//! returned offers into domain flight legs.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::FlightLeg;

use super::error::PricingError;
use super::{FlightPricingProvider, LegRequest};

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the HTTP pricing client.
#[derive(Debug, Clone)]
pub struct PricingClientConfig {
    /// Base URL of the pricing service
    pub base_url: String,
    /// API key sent in the `x-api-key` header
    pub api_key: Option<String>,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout
    pub timeout: Duration,
}

impl PricingClientConfig {
    /// Create a new config for the given service URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n.max(1);
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Request body for a multi-city fare search.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchRequest<'a> {
    origin_destinations: Vec<OriginDestination<'a>>,
    max_price: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OriginDestination<'a> {
    id: String,
    origin_location_code: &'a str,
    destination_location_code: &'a str,
    departure_date: String,
}

/// Response body: one offer per leg that could be priced.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    legs: Vec<FlightLeg>,
}

fn build_request(legs: &[LegRequest], max_price: f64) -> SearchRequest<'_> {
    SearchRequest {
        origin_destinations: legs
            .iter()
            .enumerate()
            .map(|(i, leg)| OriginDestination {
                id: (i + 1).to_string(),
                origin_location_code: leg.origin.as_str(),
                destination_location_code: leg.destination.as_str(),
                departure_date: leg.date.to_string(),
            })
            .collect(),
        max_price,
    }
}

/// HTTP flight pricing client.
///
/// Uses a semaphore to limit concurrent requests and avoid rate limiting.
#[derive(Debug, Clone)]
pub struct HttpFlightPricer {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl HttpFlightPricer {
    /// Create a new client with the given configuration.
    pub fn new(config: PricingClientConfig) -> Result<Self, PricingError> {
        let mut headers = HeaderMap::new();

        if let Some(key) = &config.api_key {
            let value = HeaderValue::from_str(key)
                .map_err(|_| PricingError::NotConfigured("invalid API key format".to_string()))?;
            headers.insert("x-api-key", value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }
}

impl FlightPricingProvider for HttpFlightPricer {
    async fn price_legs(
        &self,
        legs: &[LegRequest],
        max_price: f64,
    ) -> Result<Vec<FlightLeg>, PricingError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| PricingError::ApiError {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}/v1/flight-offers/multi-city", self.base_url);
        debug!(legs = legs.len(), max_price, "requesting fares");

        let response = self
            .http
            .post(&url)
            .json(&build_request(legs, max_price))
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(PricingError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(PricingError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PricingError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let parsed: SearchResponse =
            serde_json::from_str(&body).map_err(|e| PricingError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })?;

        Ok(parsed.legs)
    }
}
