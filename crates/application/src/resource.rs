//! Resource cache over the persistent key-value store
//!
//! An owned cache of asynchronously loaded values keyed by string.
//! Each key resolves through the store at most once (concurrent first
//! reads share a single in-flight load) and settled entries answer
//! without touching the store again. Entries settle exactly once to a
//! value or an error; `update` overwrites, `delete` removes.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::{Mutex, OnceCell};

use crate::error::{ClientError, ClientResult};
use crate::ports::KeyValueStore;

/// How a resource value is represented in the persistent store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Codec {
    /// JSON text; for structured values such as the session record.
    #[default]
    Json,
    /// The bare string itself; for token values, with the empty string
    /// meaning "no value".
    PlainText,
}

impl Codec {
    fn encode(self, value: &Value) -> ClientResult<String> {
        match self {
            Self::Json => {
                serde_json::to_string(value).map_err(|e| ClientError::Format(e.to_string()))
            }
            Self::PlainText => value.as_str().map(str::to_string).ok_or_else(|| {
                ClientError::Format("plain text codec requires a string value".to_string())
            }),
        }
    }

    fn decode(self, raw: &str) -> ClientResult<Value> {
        match self {
            Self::Json => {
                serde_json::from_str(raw).map_err(|e| ClientError::Format(e.to_string()))
            }
            Self::PlainText => Ok(Value::String(raw.to_string())),
        }
    }
}

type EntryCell = Arc<OnceCell<ClientResult<Value>>>;

/// Single-flight cache of persistently stored values.
pub struct ResourceCache {
    store: Arc<dyn KeyValueStore>,
    entries: Mutex<HashMap<String, EntryCell>>,
}

impl ResourceCache {
    /// Creates an empty cache over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Reads the value cached under `key`, loading it from the store on
    /// first access.
    ///
    /// A missing stored value yields `initial`. A stored value that
    /// fails to decode also yields `initial`, with a warning logged;
    /// corrupt local data must not take the app down.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Storage`] when the underlying store read
    /// failed (the failure is cached and returned to every subsequent
    /// read until `update` or `delete`), and [`ClientError::Format`]
    /// when `initial` cannot be serialized or the cached value does not
    /// match `T`.
    pub async fn read<T>(&self, key: &str, initial: &T, codec: Codec) -> ClientResult<T>
    where
        T: Serialize + DeserializeOwned,
    {
        let fallback =
            serde_json::to_value(initial).map_err(|e| ClientError::Format(e.to_string()))?;
        let cell = self.entry(key).await;
        let settled = cell
            .get_or_init(|| self.load(key.to_string(), fallback, codec))
            .await;
        let value = settled.clone()?;
        serde_json::from_value(value).map_err(|e| ClientError::Format(e.to_string()))
    }

    /// Overwrites the cached entry and persists the encoded value.
    ///
    /// The in-memory entry is resolved first, so a read in the same
    /// process observes the new value without awaiting persistence.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Format`] when the value cannot be encoded
    /// and [`ClientError::Storage`] when persistence fails; neither
    /// rolls back the in-memory update.
    pub async fn update<T>(&self, key: &str, value: &T, codec: Codec) -> ClientResult<()>
    where
        T: Serialize + ?Sized,
    {
        let in_memory =
            serde_json::to_value(value).map_err(|e| ClientError::Format(e.to_string()))?;
        {
            let mut entries = self.entries.lock().await;
            entries.insert(
                key.to_string(),
                Arc::new(OnceCell::new_with(Some(Ok(in_memory.clone())))),
            );
        }
        let raw = codec.encode(&in_memory)?;
        self.store.set(key, &raw).await?;
        Ok(())
    }

    /// Removes the cached entry and the persisted value.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Storage`] when the store delete fails; the
    /// in-memory entry is removed regardless.
    pub async fn delete(&self, key: &str) -> ClientResult<()> {
        self.entries.lock().await.remove(key);
        self.store.delete(key).await?;
        Ok(())
    }

    async fn entry(&self, key: &str) -> EntryCell {
        let mut entries = self.entries.lock().await;
        Arc::clone(
            entries
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(OnceCell::new())),
        )
    }

    async fn load(&self, key: String, fallback: Value, codec: Codec) -> ClientResult<Value> {
        let stored = self.store.get(&key).await?;
        match stored {
            None => Ok(fallback),
            Some(raw) => match codec.decode(&raw) {
                Ok(value) => Ok(value),
                Err(error) => {
                    tracing::warn!(
                        key = %key,
                        %error,
                        "stored value failed to decode, using initial value"
                    );
                    Ok(fallback)
                }
            },
        }
    }
}
