//! Integration tests wiring the resource cache to the file-backed store.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};

use pitchside_application::ports::KeyValueStore;
use pitchside_application::{Codec, ResourceCache};
use pitchside_infrastructure::FileKeyValueStore;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionInfo {
    token: String,
    nickname: String,
}

#[tokio::test]
async fn test_update_survives_a_fresh_cache() {
    let dir = tempfile::tempdir().unwrap();
    let session = SessionInfo {
        token: "tok-1".to_string(),
        nickname: "keeper".to_string(),
    };

    {
        let store: Arc<dyn KeyValueStore> = Arc::new(FileKeyValueStore::new(dir.path()));
        let cache = ResourceCache::new(store);
        cache.update("userInfo", &session, Codec::Json).await.unwrap();
    }

    // A new cache over the same directory starts cold and must load
    // the value from disk.
    let store: Arc<dyn KeyValueStore> = Arc::new(FileKeyValueStore::new(dir.path()));
    let cache = ResourceCache::new(store);
    let empty = SessionInfo {
        token: String::new(),
        nickname: String::new(),
    };
    let loaded = cache.read("userInfo", &empty, Codec::Json).await.unwrap();
    assert_eq!(loaded, session);
}

#[tokio::test]
async fn test_plain_text_token_is_stored_bare() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileKeyValueStore::new(dir.path()));
    let cache = ResourceCache::new(Arc::clone(&store) as Arc<dyn KeyValueStore>);

    cache
        .update("authToken", "raw-token", Codec::PlainText)
        .await
        .unwrap();

    // The file contains the token itself, not a JSON string.
    let raw = store.get("authToken").await.unwrap();
    assert_eq!(raw, Some("raw-token".to_string()));
}

#[tokio::test]
async fn test_corrupt_file_falls_back_to_initial() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileKeyValueStore::new(dir.path()));
    store.set("userInfo", "{not json").await.unwrap();

    let cache = ResourceCache::new(Arc::clone(&store) as Arc<dyn KeyValueStore>);
    let initial = SessionInfo {
        token: String::new(),
        nickname: "guest".to_string(),
    };
    let loaded = cache.read("userInfo", &initial, Codec::Json).await.unwrap();
    assert_eq!(loaded, initial);
}

#[tokio::test]
async fn test_delete_clears_disk_and_memory() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileKeyValueStore::new(dir.path()));
    let cache = ResourceCache::new(Arc::clone(&store) as Arc<dyn KeyValueStore>);

    cache
        .update("refreshToken", "refresh-1", Codec::PlainText)
        .await
        .unwrap();
    cache.delete("refreshToken").await.unwrap();

    assert_eq!(store.get("refreshToken").await.unwrap(), None);
    let reloaded: String = cache
        .read("refreshToken", &String::new(), Codec::PlainText)
        .await
        .unwrap();
    assert_eq!(reloaded, "");
}
