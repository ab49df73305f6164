//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

use crate::domain::{DomainError, ItineraryId, SearchId};
use crate::tasks::{SearchStatus, TaskError};

use super::dto::*;
use super::state::AppState;

/// How many itineraries `/cheapest` returns.
const CHEAPEST_LIMIT: usize = 5;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/itineraries/search", post(start_search))
        .route(
            "/api/v1/itineraries/search/:search_id",
            get(search_results).delete(delete_search),
        )
        .route(
            "/api/v1/itineraries/search/:search_id/status",
            get(search_status),
        )
        .route("/api/v1/itineraries/cheapest", get(cheapest))
        .route("/api/v1/itineraries/budget/:max_budget", get(within_budget))
        .route("/api/v1/itineraries/:id", get(itinerary))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Validate a search, store it and start generating in the background.
async fn start_search(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<SearchCreatedResponse>), AppError> {
    // Parse JSON manually so a malformed body is a 400 with a reason.
    let req: SearchRequest = serde_json::from_slice(&body).map_err(|e| {
        debug!(body = %String::from_utf8_lossy(&body), "unparsable search request");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let criteria = req.into_criteria(SearchId::generate())?;
    let search_id = criteria.id().clone();
    info!(%search_id, origin = %criteria.origin(), "new itinerary search");

    state.store.save_search(criteria.clone()).await;
    // Runs to completion without anyone waiting on it.
    state.tasks.start(criteria)?;

    Ok((
        StatusCode::CREATED,
        Json(SearchCreatedResponse {
            search_id,
            message: "Itinerary search started".to_string(),
        }),
    ))
}

/// Itineraries found for a search, cheapest first.
async fn search_results(
    State(state): State<AppState>,
    Path(search_id): Path<String>,
) -> Result<Json<Vec<ItineraryResult>>, AppError> {
    let search_id = SearchId::new(search_id);
    let itineraries = state.store.itineraries_for(&search_id).await;

    if itineraries.is_empty() {
        if state.tasks.status(&search_id) == Some(SearchStatus::Failed) {
            return Err(AppError::Internal {
                message: format!("Generation failed for search {search_id}"),
            });
        }
        return Err(AppError::NotFound {
            message: format!("No itineraries for search {search_id}"),
        });
    }

    Ok(Json(ItineraryResult::from_all(&itineraries)))
}

/// Where a search's generation run is.
async fn search_status(
    State(state): State<AppState>,
    Path(search_id): Path<String>,
) -> Result<Json<SearchStatusResponse>, AppError> {
    let search_id = SearchId::new(search_id);
    let status = state
        .tasks
        .status(&search_id)
        .ok_or_else(|| TaskError::NotFound(search_id.clone()))?;

    Ok(Json(SearchStatusResponse { search_id, status }))
}

/// Cancel a search's run and delete it with its itineraries.
async fn delete_search(
    State(state): State<AppState>,
    Path(search_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let search_id = SearchId::new(search_id);
    let forgotten = state.tasks.remove(&search_id).await.is_ok();
    let deleted = state.store.delete_search(&search_id).await;

    if !(forgotten || deleted) {
        return Err(TaskError::NotFound(search_id).into());
    }
    info!(%search_id, "search deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// One itinerary by id.
async fn itinerary(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ItineraryResult>, AppError> {
    let id = ItineraryId::new(id);
    let itinerary = state
        .store
        .itinerary(&id)
        .await
        .ok_or_else(|| AppError::NotFound {
            message: format!("Itinerary {id} not found"),
        })?;

    Ok(Json(ItineraryResult::from_itinerary(&itinerary)))
}

/// The cheapest stored itineraries.
async fn cheapest(State(state): State<AppState>) -> Json<Vec<ItineraryResult>> {
    let itineraries = state.store.cheapest(CHEAPEST_LIMIT).await;
    Json(ItineraryResult::from_all(&itineraries))
}

/// Every stored itinerary within a budget.
async fn within_budget(
    State(state): State<AppState>,
    Path(max_budget): Path<f64>,
) -> Json<Vec<ItineraryResult>> {
    let itineraries = state.store.within_budget(max_budget).await;
    Json(ItineraryResult::from_all(&itineraries))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Conflict { message: String },
    Internal { message: String },
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<TaskError> for AppError {
    fn from(e: TaskError) -> Self {
        match e {
            TaskError::AlreadyRunning(_) => AppError::Conflict {
                message: e.to_string(),
            },
            TaskError::NotFound(_) => AppError::NotFound {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Conflict { message } => (StatusCode::CONFLICT, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            debug!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
