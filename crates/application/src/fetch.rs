//! Generic fetch controller
//!
//! [`Fetcher`] performs a single HTTP request described by a
//! [`FetchRequest`] and exposes loading/error/data state. Failures never
//! escape to the caller; they are captured into the state for rendering.
//!
//! Overlapping dispatches are tagged with a monotonically increasing
//! sequence number, and a result older than the last applied one is
//! discarded, so a slow early response cannot overwrite fresher data.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use pitchside_domain::{FetchOverrides, FetchRequest, unwrap_data};

use crate::error::ClientError;
use crate::ports::HttpTransport;

/// Observable state of one fetch.
///
/// After a completed request at most one of `data` and `error` is
/// populated; `loading` is true only while a request is in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T> {
    /// Unwrapped response payload of the last successful fetch.
    pub data: Option<T>,
    /// Whether a request is currently in flight.
    pub loading: bool,
    /// Failure of the last completed fetch.
    pub error: Option<ClientError>,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

impl<T> FetchState<T> {
    /// Returns true if the last fetch completed successfully.
    #[must_use]
    pub const fn is_fetched(&self) -> bool {
        self.data.is_some()
    }
}

/// Executes [`FetchRequest`]s against a transport and tracks their state.
pub struct Fetcher<T> {
    transport: Arc<dyn HttpTransport>,
    request: Mutex<FetchRequest>,
    state: Mutex<FetchState<T>>,
    dispatched: AtomicU64,
    applied: AtomicU64,
}

impl<T> Fetcher<T>
where
    T: DeserializeOwned + Clone + Send,
{
    /// Creates a fetcher for the given descriptor. No request is issued
    /// until [`run`](Self::run), [`refetch`](Self::refetch) or a
    /// dependency change via [`update`](Self::update).
    #[must_use]
    pub fn new(transport: Arc<dyn HttpTransport>, request: FetchRequest) -> Self {
        Self {
            transport,
            request: Mutex::new(request),
            state: Mutex::new(FetchState::default()),
            dispatched: AtomicU64::new(0),
            applied: AtomicU64::new(0),
        }
    }

    /// Returns a snapshot of the current fetch state.
    pub async fn state(&self) -> FetchState<T> {
        self.state.lock().await.clone()
    }

    /// Returns a copy of the stored descriptor.
    pub async fn request(&self) -> FetchRequest {
        self.request.lock().await.clone()
    }

    /// Executes the stored descriptor. No-op when `skip` is set.
    pub async fn run(&self) {
        let request = self.request.lock().await.clone();
        if request.skip {
            return;
        }
        self.dispatch(request).await;
    }

    /// Re-runs the fetch with the overrides shallow-merged over the
    /// stored descriptor. The stored descriptor is not mutated, and an
    /// explicit refetch runs even when `skip` is set.
    pub async fn refetch(&self, overrides: FetchOverrides) {
        let request = self.request.lock().await.merged(overrides);
        self.dispatch(request).await;
    }

    /// Replaces the stored descriptor. When the dependency list changed
    /// and the descriptor is automatic (`auto && !skip`), a new fetch is
    /// dispatched.
    pub async fn update(&self, request: FetchRequest) {
        let deps_changed = {
            let mut current = self.request.lock().await;
            let changed = current.deps != request.deps;
            *current = request.clone();
            changed
        };
        if deps_changed && request.auto && !request.skip {
            self.dispatch(request).await;
        }
    }

    async fn dispatch(&self, request: FetchRequest) {
        let seq = self.dispatched.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.lock().await;
            state.loading = true;
            state.error = None;
        }

        let outcome = self.perform(&request).await;

        let mut state = self.state.lock().await;
        if seq <= self.applied.load(Ordering::SeqCst) {
            // A newer dispatch already applied its result.
            return;
        }
        self.applied.store(seq, Ordering::SeqCst);
        state.loading = false;
        match outcome {
            Ok(data) => {
                state.data = Some(data);
                state.error = None;
            }
            Err(error) => {
                state.data = None;
                state.error = Some(error);
            }
        }
    }

    async fn perform(&self, request: &FetchRequest) -> Result<T, ClientError> {
        let http = request.resolve()?;
        let response = self.transport.execute(http).await?;
        Ok(unwrap_data(&response)?)
    }
}
