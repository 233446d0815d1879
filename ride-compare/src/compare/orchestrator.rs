//! Single-flight comparison orchestration.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::domain::{Estimate, TripRequest};

use super::client::CompareClient;
use super::error::CompareError;
use super::state::{ComparisonEvent, ComparisonState};

/// Trait for fetching comparisons.
///
/// This abstraction allows the orchestrator to be tested with scripted
/// responses.
pub trait ComparisonBackend: Send + Sync {
    /// Fetch estimates for a trip.
    fn compare(
        &self,
        request: &TripRequest,
    ) -> impl Future<Output = Result<Vec<Estimate>, CompareError>> + Send;

    /// Liveness probe.
    fn health(&self) -> impl Future<Output = bool> + Send;
}

impl ComparisonBackend for CompareClient {
    async fn compare(&self, request: &TripRequest) -> Result<Vec<Estimate>, CompareError> {
        CompareClient::compare(self, request).await
    }

    async fn health(&self) -> bool {
        CompareClient::health(self).await
    }
}

/// The comparison currently considered authoritative.
#[derive(Debug, Default)]
struct Flight {
    /// Token of the latest `compare()` call. Settlements carrying any
    /// other token are discarded.
    token: u64,

    /// Task running the latest call, until it settles.
    pending: Option<JoinHandle<()>>,
}

struct Shared {
    flight: Mutex<Flight>,
    state: watch::Sender<ComparisonState>,
}

impl Shared {
    fn flight(&self) -> MutexGuard<'_, Flight> {
        self.flight.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn transition(&self, event: ComparisonEvent) {
        self.state
            .send_modify(|state| *state = std::mem::take(state).apply(event));
    }

    fn settle(&self, token: u64, outcome: Result<Vec<Estimate>, CompareError>) {
        let mut flight = self.flight();

        if flight.token != token {
            debug!(token, current = flight.token, "discarding superseded comparison");
            return;
        }
        flight.pending = None;

        let event = match outcome {
            Ok(estimates) => {
                info!(token, estimates = estimates.len(), "comparison succeeded");
                ComparisonEvent::Succeeded {
                    estimates,
                    received_at: Utc::now(),
                }
            }
            Err(e) => {
                warn!(token, error = %e.detail(), "comparison failed");
                ComparisonEvent::Failed(e.to_string())
            }
        };

        self.transition(event);
    }
}

/// Owns the round trip from a trip request to a result set or error.
///
/// Each [`compare`](CompareOrchestrator::compare) call supersedes the
/// previous one: the earlier task is aborted, and should its result still
/// arrive it is dropped because its token no longer matches. Must be used
/// from within a Tokio runtime.
pub struct CompareOrchestrator<B> {
    backend: Arc<B>,
    shared: Arc<Shared>,
}

impl<B: ComparisonBackend + 'static> CompareOrchestrator<B> {
    /// Create an orchestrator in the `Idle` state.
    pub fn new(backend: Arc<B>) -> Self {
        let (state, _) = watch::channel(ComparisonState::Idle);

        Self {
            backend,
            shared: Arc::new(Shared {
                flight: Mutex::new(Flight::default()),
                state,
            }),
        }
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<ComparisonState> {
        self.shared.state.subscribe()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ComparisonState {
        self.shared.state.borrow().clone()
    }

    /// Start a comparison.
    ///
    /// The state is `Loading`, with previous results and errors cleared,
    /// before this returns. No retries are made on failure.
    pub fn compare(&self, request: TripRequest) {
        let mut flight = self.shared.flight();

        if let Some(pending) = flight.pending.take() {
            debug!(token = flight.token, "superseding in-flight comparison");
            pending.abort();
        }
        flight.token += 1;
        let token = flight.token;

        self.shared.transition(ComparisonEvent::Started);
        info!(token, category = %request.category, "starting comparison");

        let backend = Arc::clone(&self.backend);
        let shared = Arc::clone(&self.shared);

        flight.pending = Some(tokio::spawn(async move {
            let outcome = backend.compare(&request).await;
            shared.settle(token, outcome);
        }));
    }

    /// Wait until the latest comparison settles and return its state.
    ///
    /// Returns the current state immediately if nothing is loading.
    pub async fn settled(&self) -> ComparisonState {
        let mut rx = self.subscribe();
        match rx.wait_for(|state| !state.is_loading()).await {
            Ok(state) => state.clone(),
            // The sender lives in `self`, so this is unreachable while
            // `self` is borrowed.
            Err(_) => self.state(),
        }
    }

    /// Check backend liveness.
    pub async fn health(&self) -> bool {
        self.backend.health().await
    }
}

impl<B> Drop for CompareOrchestrator<B> {
    fn drop(&mut self) {
        let mut flight = self.shared.flight.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(pending) = flight.pending.take() {
            pending.abort();
        }
    }
}
