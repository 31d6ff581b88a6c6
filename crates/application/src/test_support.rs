//! In-memory port fakes shared by the unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use pitchside_domain::{HttpRequest, RawResponse};

use crate::ports::{HttpTransport, KeyValueStore, StoreError, TransportError};

/// Transport fake replaying queued responses and recording requests.
#[derive(Default)]
pub struct FakeTransport {
    responses: Mutex<VecDeque<Result<RawResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn push_response(&self, response: RawResponse) {
        self.responses.lock().await.push_back(Ok(response));
    }

    pub async fn push_error(&self, error: TransportError) {
        self.responses.lock().await.push_back(Err(error));
    }

    pub async fn recorded_requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl HttpTransport for FakeTransport {
    async fn execute(&self, request: HttpRequest) -> Result<RawResponse, TransportError> {
        // Per-request artificial latency, driven by an `x-test-delay-ms`
        // header, so tests can interleave in-flight requests.
        let delay_ms = request
            .headers
            .iter()
            .find(|(name, _)| name == "x-test-delay-ms")
            .and_then(|(_, value)| value.parse::<u64>().ok());

        self.requests.lock().await.push(request);
        let next = self.responses.lock().await.pop_front();

        if let Some(delay_ms) = delay_ms {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }

        next.unwrap_or_else(|| {
            Err(TransportError::Other(
                "fake transport: no response queued".to_string(),
            ))
        })
    }
}

/// Key-value store fake counting underlying reads.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
    gets: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_value(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .values
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        store
    }

    pub fn get_count(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub async fn raw_value(&self, key: &str) -> Option<String> {
        self.values.lock().await.get(key).cloned()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        Ok(self.values.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.values.lock().await.remove(key);
        Ok(())
    }
}

/// Store fake whose every operation fails.
pub struct BrokenStore;

#[async_trait]
impl KeyValueStore for BrokenStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Backend("store unavailable".to_string()))
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Backend("store unavailable".to_string()))
    }

    async fn delete(&self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::Backend("store unavailable".to_string()))
    }
}
