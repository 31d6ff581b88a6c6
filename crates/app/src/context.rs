//! Application configuration and composition root.
//!
//! Wires the concrete transport and store into the client core. The
//! context owns every long-lived service the app shares.

use std::path::PathBuf;
use std::sync::Arc;

use pitchside_application::ports::KeyValueStore;
use pitchside_application::{
    ApiClient, AuthStrategy, BearerAuth, ClientError, Codec, ResourceCache,
};
use pitchside_domain::HttpMethod;
use pitchside_infrastructure::{FileKeyValueStore, ReqwestTransport};

const DEFAULT_API_URL: &str = "https://api.pitchside.app/api/";
const AUTH_TOKEN_KEY: &str = "authToken";

/// Runtime configuration, sourced from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Pitchside API.
    pub api_url: String,
    /// Directory holding the on-disk key-value store.
    pub data_dir: PathBuf,
}

impl Config {
    /// Reads configuration from `PITCHSIDE_API_URL` and
    /// `PITCHSIDE_DATA_DIR`, falling back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let api_url = std::env::var("PITCHSIDE_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let data_dir = std::env::var_os("PITCHSIDE_DATA_DIR")
            .map_or_else(|| PathBuf::from(".pitchside"), PathBuf::from);
        Self { api_url, data_dir }
    }
}

/// Long-lived services shared across the app.
pub struct AppContext {
    /// Typed API client.
    pub client: ApiClient,
    /// Cached view over the on-disk store.
    pub cache: Arc<ResourceCache>,
    /// Token holder backing the client's auth strategy.
    pub auth: Arc<BearerAuth>,
}

impl AppContext {
    /// Builds the full service graph from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP transport cannot be created.
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let store: Arc<dyn KeyValueStore> =
            Arc::new(FileKeyValueStore::new(config.data_dir.clone()));
        let cache = Arc::new(ResourceCache::new(Arc::clone(&store)));

        let auth = Arc::new(
            BearerAuth::new(Arc::new(|| {
                tracing::warn!("session expired, sign-in required");
            }))
            .require_token_for("users")
            .require_token_for("teams")
            .require_token_for("gifts")
            .exempt_unauthorized(HttpMethod::Delete, "teams"),
        );

        let transport = Arc::new(ReqwestTransport::new()?);
        let client = ApiClient::new(
            transport,
            config.api_url.clone(),
            Arc::clone(&auth) as Arc<dyn AuthStrategy>,
        );

        Ok(Self {
            client,
            cache,
            auth,
        })
    }

    /// Restores a persisted auth token into the bearer strategy, if
    /// one was saved by a previous session.
    pub async fn restore_session(&self) -> Result<bool, ClientError> {
        let token: String = self
            .cache
            .read(AUTH_TOKEN_KEY, &String::new(), Codec::PlainText)
            .await?;
        if token.is_empty() {
            return Ok(false);
        }
        self.auth.set_token(token).await;
        Ok(true)
    }
}
