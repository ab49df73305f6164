//! Background generation runs, one per search.
//!
//! [`SearchTasks`] owns the runs in flight. Starting a run for a search
//! that already has one fails with [`TaskError::AlreadyRunning`], and a run
//! keeps its slot until its task has actually ended, cancelled or not. A
//! run can be cancelled until it starts saving; a cancelled run never
//! reaches the sink. Final statuses are kept until the search is removed.

use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::FutureExt;
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::domain::{Itinerary, SearchCriteria, SearchId};
use crate::planner::Planner;
use crate::pricing::FlightPricingProvider;
use crate::store::ItinerarySink;
use crate::weather::WeatherProvider;

/// Where a search's generation run is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SearchStatus {
    Running,
    Completed { itineraries: usize },
    Cancelled,
    Failed,
}

/// Errors from the task registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    #[error("generation for search {0} is already running")]
    AlreadyRunning(SearchId),

    #[error("no generation run for search {0}")]
    NotFound(SearchId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Generating,
    /// Cancellation requested; the task hasn't ended yet.
    Stopping,
    /// Past the point of no return.
    Saving,
}

struct Running {
    token: u64,
    phase: Phase,
    cancel: watch::Sender<bool>,
    /// Closed once the run's task has ended.
    finished: watch::Receiver<()>,
}

#[derive(Default)]
struct Registry {
    running: HashMap<SearchId, Running>,
    statuses: HashMap<SearchId, SearchStatus>,
    next_token: u64,
}

impl Registry {
    /// Ask a generating run to stop.
    ///
    /// Returns whether the run is (now) stopping, plus a receiver that
    /// closes when its task ends.
    fn request_stop(&mut self, search_id: &SearchId) -> Option<(bool, watch::Receiver<()>)> {
        let running = self.running.get_mut(search_id)?;
        if running.phase == Phase::Generating {
            running.phase = Phase::Stopping;
            // The task may already be past its select; the phase covers that.
            let _ = running.cancel.send(true);
            self.statuses
                .insert(search_id.clone(), SearchStatus::Cancelled);
        }
        let running = self.running.get(search_id)?;
        Some((running.phase == Phase::Stopping, running.finished.clone()))
    }

    /// Move a run to saving, unless it was cancelled or superseded.
    fn begin_save(&mut self, search_id: &SearchId, token: u64) -> bool {
        match self.running.get_mut(search_id) {
            Some(running) if running.token == token && running.phase == Phase::Generating => {
                running.phase = Phase::Saving;
                true
            }
            _ => false,
        }
    }

    /// Free a run's slot and record how it ended.
    fn finish(&mut self, search_id: &SearchId, token: u64, status: SearchStatus) -> SearchStatus {
        let Some(running) = self.running.get(search_id) else {
            return status;
        };
        if running.token != token {
            return status;
        }
        let status = match running.phase {
            Phase::Stopping => SearchStatus::Cancelled,
            Phase::Generating | Phase::Saving => status,
        };
        self.running.remove(search_id);
        self.statuses.insert(search_id.clone(), status);
        status
    }
}

fn lock(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Handle on one started run.
pub struct TaskHandle {
    search_id: SearchId,
    join: JoinHandle<SearchStatus>,
}

impl TaskHandle {
    pub fn search_id(&self) -> &SearchId {
        &self.search_id
    }

    /// Wait for the run to end.
    pub async fn wait(self) -> SearchStatus {
        self.join.await.unwrap_or(SearchStatus::Failed)
    }
}

/// Registry of background generation runs.
pub struct SearchTasks<P, W, S> {
    planner: Arc<Planner<P, W>>,
    sink: Arc<S>,
    registry: Arc<Mutex<Registry>>,
}

impl<P, W, S> Clone for SearchTasks<P, W, S> {
    fn clone(&self) -> Self {
        Self {
            planner: Arc::clone(&self.planner),
            sink: Arc::clone(&self.sink),
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<P, W, S> SearchTasks<P, W, S>
where
    P: FlightPricingProvider + 'static,
    W: WeatherProvider + 'static,
    S: ItinerarySink + 'static,
{
    pub fn new(planner: Arc<Planner<P, W>>, sink: Arc<S>) -> Self {
        Self {
            planner,
            sink,
            registry: Arc::new(Mutex::new(Registry::default())),
        }
    }

    fn registry(&self) -> MutexGuard<'_, Registry> {
        lock(&self.registry)
    }

    /// Start generating itineraries for a search in the background.
    ///
    /// Results are handed to the sink when the run completes.
    pub fn start(&self, criteria: SearchCriteria) -> Result<TaskHandle, TaskError> {
        let search_id = criteria.id().clone();
        let (cancel, mut cancelled) = watch::channel(false);
        let (finished_tx, finished) = watch::channel(());

        let token = {
            let mut registry = self.registry();
            if registry.running.contains_key(&search_id) {
                return Err(TaskError::AlreadyRunning(search_id));
            }
            let token = registry.next_token;
            registry.next_token += 1;
            registry.running.insert(
                search_id.clone(),
                Running {
                    token,
                    phase: Phase::Generating,
                    cancel,
                    finished,
                },
            );
            registry
                .statuses
                .insert(search_id.clone(), SearchStatus::Running);
            token
        };

        let planner = Arc::clone(&self.planner);
        let sink = Arc::clone(&self.sink);
        let registry = Arc::clone(&self.registry);
        let id = search_id.clone();

        let join = tokio::spawn(async move {
            let mut run = tokio::spawn(async move { planner.generate(&criteria).await });

            let generated = tokio::select! {
                joined = &mut run => Some(joined),
                _ = cancelled.changed() => {
                    run.abort();
                    None
                }
            };

            let status = match generated {
                None => SearchStatus::Cancelled,
                Some(Err(e)) => {
                    error!(search_id = %id, error = %e, "generation run failed");
                    SearchStatus::Failed
                }
                Some(Ok(result)) => save(&registry, &*sink, &id, token, result.itineraries).await,
            };

            let status = lock(&registry).finish(&id, token, status);
            debug!(search_id = %id, ?status, "generation run ended");
            drop(finished_tx);
            status
        });

        debug!(%search_id, "generation run started");
        Ok(TaskHandle { search_id, join })
    }

    /// Cancel a running search.
    ///
    /// Returns whether the run will end without saving. A run that has
    /// already started saving can't be cancelled.
    pub fn cancel(&self, search_id: &SearchId) -> bool {
        self.registry()
            .request_stop(search_id)
            .is_some_and(|(stopping, _)| stopping)
    }

    /// Cancel any run, wait for its task to end, and forget the search.
    ///
    /// Once this returns nothing more will be saved for the search.
    pub async fn remove(&self, search_id: &SearchId) -> Result<(), TaskError> {
        let pending = self.registry().request_stop(search_id);
        if let Some((_, mut finished)) = pending {
            // Errors once the task drops its sender, which is all we wait for.
            let _ = finished.changed().await;
        }

        match self.registry().statuses.remove(search_id) {
            Some(_) => Ok(()),
            None => Err(TaskError::NotFound(search_id.clone())),
        }
    }

    /// Status of a search's latest run.
    pub fn status(&self, search_id: &SearchId) -> Option<SearchStatus> {
        self.registry().statuses.get(search_id).copied()
    }

    /// Whether a run's task is still alive for the search.
    pub fn is_running(&self, search_id: &SearchId) -> bool {
        self.registry().running.contains_key(search_id)
    }
}

/// Hand a finished run's itineraries to the sink if it is still wanted.
async fn save<S: ItinerarySink>(
    registry: &Mutex<Registry>,
    sink: &S,
    search_id: &SearchId,
    token: u64,
    itineraries: Vec<Itinerary>,
) -> SearchStatus {
    let wanted = lock(registry).begin_save(search_id, token);
    if !wanted {
        debug!(%search_id, "run cancelled before saving");
        return SearchStatus::Cancelled;
    }

    let count = itineraries.len();
    match AssertUnwindSafe(sink.save_all(itineraries))
        .catch_unwind()
        .await
    {
        Ok(()) => {
            info!(%search_id, itineraries = count, "search completed");
            SearchStatus::Completed { itineraries: count }
        }
        Err(_) => {
            error!(%search_id, "saving itineraries panicked");
            SearchStatus::Failed
        }
    }
}
