//! Web layer for the trip planner.
//!
//! Provides HTTP endpoints for starting searches and reading back the
//! itineraries they produced.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppPlanner, AppState, AppTasks};
