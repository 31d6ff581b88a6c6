//! Authorization header strategies
//!
//! The strategies behind [`ApiClient`](super::ApiClient): where the
//! token comes from, when a request may go out without one, and what
//! happens on a 401. All strategies emit the `Bearer <token>` scheme.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use pitchside_domain::{HttpMethod, UserSession};

use crate::error::{ClientError, ClientResult};
use crate::ports::KeyValueStore;

/// Callback invoked when a request needed a token and none was usable.
pub type ExpiredCallback = Arc<dyn Fn() + Send + Sync>;

/// Strategy deciding the Authorization header and the 401 reaction.
#[async_trait]
pub trait AuthStrategy: Send + Sync {
    /// Resolves the Authorization header value for a request, or fails
    /// before any network call is made.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingToken`] when the request requires a
    /// token and none is available.
    async fn authorize(&self, method: HttpMethod, path: &str) -> ClientResult<Option<String>>;

    /// Called when the server answered 401 for the given request.
    async fn on_unauthorized(&self, method: HttpMethod, path: &str);
}

/// Reads the session record from the key-value store on every request.
///
/// Requests go out without a header when no usable session exists; an
/// unreadable record is logged and treated as signed-out. A 401 draws
/// no reaction; the caller renders the error.
pub struct SessionAuth {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl SessionAuth {
    /// Storage key of the session record.
    pub const DEFAULT_KEY: &'static str = "userInfo";

    /// Creates a strategy reading the session from the default key.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(store, Self::DEFAULT_KEY)
    }

    /// Creates a strategy reading the session from a custom key.
    #[must_use]
    pub fn with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }
}

#[async_trait]
impl AuthStrategy for SessionAuth {
    async fn authorize(&self, _method: HttpMethod, _path: &str) -> ClientResult<Option<String>> {
        let raw = match self.store.get(&self.key).await {
            Ok(raw) => raw,
            Err(error) => {
                tracing::warn!(key = %self.key, %error, "session store unreadable");
                None
            }
        };
        let Some(raw) = raw else {
            return Ok(None);
        };
        match serde_json::from_str::<UserSession>(&raw) {
            Ok(session) => Ok(session.token().map(|token| format!("Bearer {token}"))),
            Err(error) => {
                tracing::warn!(key = %self.key, %error, "session record failed to decode");
                Ok(None)
            }
        }
    }

    async fn on_unauthorized(&self, _method: HttpMethod, _path: &str) {}
}

/// Holds a settable in-memory token and an expiry callback.
///
/// Paths matching a configured auth-required prefix fail fast with
/// [`ClientError::MissingToken`] when no token is held, invoking the
/// callback without a network call. A 401 invokes the callback unless
/// the request matches a configured exemption: intentional teardown
/// flows such as deleting a team must not race the expiry redirect.
pub struct BearerAuth {
    token: RwLock<Option<String>>,
    on_expired: ExpiredCallback,
    auth_required: Vec<String>,
    unauthorized_exempt: Vec<(HttpMethod, String)>,
}

impl BearerAuth {
    /// Creates a strategy with no token and no configured prefixes.
    #[must_use]
    pub fn new(on_expired: ExpiredCallback) -> Self {
        Self {
            token: RwLock::new(None),
            on_expired,
            auth_required: Vec::new(),
            unauthorized_exempt: Vec::new(),
        }
    }

    /// Requires a token for paths starting with `prefix`.
    #[must_use]
    pub fn require_token_for(mut self, prefix: impl Into<String>) -> Self {
        self.auth_required.push(normalize(&prefix.into()));
        self
    }

    /// Exempts matching requests from the 401 expiry reaction.
    #[must_use]
    pub fn exempt_unauthorized(mut self, method: HttpMethod, prefix: impl Into<String>) -> Self {
        self.unauthorized_exempt
            .push((method, normalize(&prefix.into())));
        self
    }

    /// Installs the bearer token used for subsequent requests.
    pub async fn set_token(&self, token: impl Into<String>) {
        *self.token.write().await = Some(token.into());
    }

    /// Clears the held token.
    pub async fn clear_token(&self) {
        *self.token.write().await = None;
    }

    fn requires_token(&self, path: &str) -> bool {
        let path = normalize(path);
        self.auth_required
            .iter()
            .any(|prefix| path.starts_with(prefix))
    }

    fn is_exempt(&self, method: HttpMethod, path: &str) -> bool {
        let path = normalize(path);
        self.unauthorized_exempt
            .iter()
            .any(|(m, prefix)| *m == method && path.starts_with(prefix))
    }
}

fn normalize(path: &str) -> String {
    path.trim_start_matches('/').to_string()
}

#[async_trait]
impl AuthStrategy for BearerAuth {
    async fn authorize(&self, _method: HttpMethod, path: &str) -> ClientResult<Option<String>> {
        let token = self.token.read().await.clone();
        match token {
            Some(token) => Ok(Some(format!("Bearer {token}"))),
            None if self.requires_token(path) => {
                (self.on_expired)();
                Err(ClientError::MissingToken(path.to_string()))
            }
            None => Ok(None),
        }
    }

    async fn on_unauthorized(&self, method: HttpMethod, path: &str) {
        if !self.is_exempt(method, path) {
            (self.on_expired)();
        }
    }
}
