//! Typed API client
//!
//! Thin wrapper translating typed method calls into HTTP calls through
//! the transport port. Every response is expected to carry the `{data}`
//! envelope; failures surface as typed [`ClientError`]s.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use pitchside_domain::{
    CreateTeam, FetchRequest, Gift, HttpMethod, LoginCredentials, Page, Post, RawResponse,
    SendGift, Team, Tokens, UpdateProfile, UserProfile, classify_error, unwrap_data,
};

use crate::error::{ClientError, ClientResult};
use crate::ports::HttpTransport;

use super::AuthStrategy;

/// HTTP client for the Pitchside backend.
pub struct ApiClient {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
    auth: Arc<dyn AuthStrategy>,
}

impl ApiClient {
    /// Creates a client for the given base URL and auth strategy.
    #[must_use]
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        base_url: impl Into<String>,
        auth: Arc<dyn AuthStrategy>,
    ) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            auth,
        }
    }

    /// Signs in and returns the issued token pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the credentials are
    /// rejected.
    pub async fn login(&self, credentials: &LoginCredentials) -> ClientResult<Tokens> {
        self.request_json(HttpMethod::Post, "auth/login", &[], Some(credentials))
            .await
    }

    /// Fetches the signed-in user's profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn profile(&self) -> ClientResult<UserProfile> {
        self.request_json::<UserProfile, ()>(HttpMethod::Get, "users/me", &[], None)
            .await
    }

    /// Updates the signed-in user's profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn update_profile(&self, update: &UpdateProfile) -> ClientResult<UserProfile> {
        self.request_json(HttpMethod::Patch, "users/me", &[], Some(update))
            .await
    }

    /// Fetches a team by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the team is unknown.
    pub async fn team(&self, team_id: i64) -> ClientResult<Team> {
        self.request_json::<Team, ()>(HttpMethod::Get, &format!("teams/{team_id}"), &[], None)
            .await
    }

    /// Creates a team and returns it.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn create_team(&self, team: &CreateTeam) -> ClientResult<Team> {
        self.request_json(HttpMethod::Post, "teams", &[], Some(team))
            .await
    }

    /// Deletes a team.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete_team(&self, team_id: i64) -> ClientResult<()> {
        let response = self
            .send::<()>(HttpMethod::Delete, &format!("teams/{team_id}"), &[], None)
            .await?;
        if response.status.is_success() {
            Ok(())
        } else {
            Err(classify_error(&response).into())
        }
    }

    /// Fetches one page of the feed.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn feed_page(&self, cursor: u64, limit: u64) -> ClientResult<Page<Post>> {
        self.request_json::<Page<Post>, ()>(
            HttpMethod::Get,
            "posts",
            &page_query(cursor, limit),
            None,
        )
        .await
    }

    /// Sends a gift to another user.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn send_gift(&self, gift: &SendGift) -> ClientResult<Gift> {
        self.request_json(HttpMethod::Post, "gifts", &[], Some(gift))
            .await
    }

    /// Fetches one page of the gifts the user received.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn received_gifts(&self, cursor: u64, limit: u64) -> ClientResult<Page<Gift>> {
        self.request_json::<Page<Gift>, ()>(
            HttpMethod::Get,
            "gifts/received",
            &page_query(cursor, limit),
            None,
        )
        .await
    }

    /// Returns the base URL this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn request_json<T, B>(
        &self,
        method: HttpMethod,
        path: &str,
        query: &[(String, String)],
        body: Option<&B>,
    ) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let response = self.send(method, path, query, body).await?;
        Ok(unwrap_data(&response)?)
    }

    async fn send<B>(
        &self,
        method: HttpMethod,
        path: &str,
        query: &[(String, String)],
        body: Option<&B>,
    ) -> ClientResult<RawResponse>
    where
        B: Serialize,
    {
        let auth_header = self.auth.authorize(method, path).await?;

        let body: Option<Value> = body
            .map(|b| serde_json::to_value(b).map_err(|e| ClientError::Format(e.to_string())))
            .transpose()?;

        let mut request = FetchRequest::new(&self.base_url, path).with_method(method);
        request.query = query.to_vec();
        request.body = body;
        if let Some(value) = auth_header {
            request.headers.push(("Authorization".to_string(), value));
        }

        let http = request.resolve()?;
        let response = self.transport.execute(http).await?;
        if response.status.as_u16() == 401 {
            self.auth.on_unauthorized(method, path).await;
        }
        Ok(response)
    }
}

fn page_query(cursor: u64, limit: u64) -> Vec<(String, String)> {
    vec![
        ("cursor".to_string(), cursor.to_string()),
        ("limit".to_string(), limit.to_string()),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::api::{BearerAuth, SessionAuth};
    use crate::test_support::{FakeTransport, MemoryStore};
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const BASE: &str = "https://api.pitchside.app";

    fn client_with_session(
        transport: &Arc<FakeTransport>,
        store: Arc<MemoryStore>,
    ) -> ApiClient {
        ApiClient::new(
            Arc::clone(transport) as Arc<dyn HttpTransport>,
            BASE,
            Arc::new(SessionAuth::new(store)),
        )
    }

    #[tokio::test]
    async fn test_profile_unwraps_envelope() {
        let transport = Arc::new(FakeTransport::new());
        transport
            .push_response(RawResponse::json(
                200,
                r#"{"data": {"id": 1, "nickname": "minji", "university": "KU"}}"#,
            ))
            .await;

        let client = client_with_session(&transport, Arc::new(MemoryStore::new()));
        let profile = client.profile().await.unwrap();
        assert_eq!(profile.nickname, "minji");
        assert_eq!(profile.university, "KU");
    }

    #[tokio::test]
    async fn test_session_token_is_attached() {
        let transport = Arc::new(FakeTransport::new());
        transport
            .push_response(RawResponse::json(
                200,
                r#"{"data": {"id": 1, "nickname": "minji", "university": "KU"}}"#,
            ))
            .await;
        let store = Arc::new(
            MemoryStore::with_value("userInfo", r#"{"token": "s3ss10n", "nickname": "minji"}"#)
                .await,
        );

        let client = client_with_session(&transport, store);
        client.profile().await.unwrap();

        let recorded = transport.recorded_requests().await;
        assert_eq!(
            recorded[0].headers,
            vec![("Authorization".to_string(), "Bearer s3ss10n".to_string())]
        );
    }

    #[tokio::test]
    async fn test_api_error_carries_status_and_message() {
        let transport = Arc::new(FakeTransport::new());
        transport
            .push_response(RawResponse::json(404, r#"{"message": "no such team"}"#))
            .await;

        let client = client_with_session(&transport, Arc::new(MemoryStore::new()));
        let error = client.team(99).await.unwrap_err();
        assert_eq!(error.status(), Some(404));
        assert!(error.to_string().contains("no such team"));
    }

    #[tokio::test]
    async fn test_missing_token_fails_before_network() {
        let transport = Arc::new(FakeTransport::new());
        let auth = BearerAuth::new(Arc::new(|| {})).require_token_for("gifts");
        let client = ApiClient::new(
            Arc::clone(&transport) as Arc<dyn HttpTransport>,
            BASE,
            Arc::new(auth),
        );

        let error = client
            .send_gift(&SendGift {
                recipient_id: 2,
                message: "nice match".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(error, ClientError::MissingToken(_)));
        assert!(transport.recorded_requests().await.is_empty());
    }

    #[tokio::test]
    async fn test_401_fires_expiry_except_for_team_teardown() {
        let transport = Arc::new(FakeTransport::new());
        transport.push_response(RawResponse::json(401, "{}")).await;
        transport.push_response(RawResponse::json(401, "{}")).await;

        let count = Arc::new(AtomicUsize::new(0));
        let hits = Arc::clone(&count);
        let auth = BearerAuth::new(Arc::new(move || {
            hits.fetch_add(1, Ordering::SeqCst);
        }))
        .exempt_unauthorized(HttpMethod::Delete, "teams");
        auth.set_token("stale").await;

        let client = ApiClient::new(
            Arc::clone(&transport) as Arc<dyn HttpTransport>,
            BASE,
            Arc::new(auth),
        );

        // Teardown flow: 401 surfaces but the callback stays quiet.
        assert!(client.delete_team(7).await.is_err());
        assert_eq!(count.load(Ordering::SeqCst), 0);

        // Ordinary request: 401 fires the callback.
        assert!(client.profile().await.is_err());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_login_posts_credentials() {
        let transport = Arc::new(FakeTransport::new());
        transport
            .push_response(RawResponse::json(
                200,
                r#"{"data": {"accessToken": "a", "refreshToken": "r"}}"#,
            ))
            .await;

        let client = client_with_session(&transport, Arc::new(MemoryStore::new()));
        let tokens = client
            .login(&LoginCredentials {
                email: "minji@ku.ac.kr".to_string(),
                password: "hunter2".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(tokens.access_token, "a");

        let recorded = transport.recorded_requests().await;
        assert_eq!(recorded[0].method, HttpMethod::Post);
        assert_eq!(recorded[0].url.path(), "/auth/login");
        assert_eq!(
            recorded[0].body,
            Some(serde_json::json!({"email": "minji@ku.ac.kr", "password": "hunter2"}))
        );
    }

    #[tokio::test]
    async fn test_feed_page_sets_cursor_and_limit() {
        let transport = Arc::new(FakeTransport::new());
        transport
            .push_response(RawResponse::json(
                200,
                r#"{"data": {"list": [], "hasMoreList": false}}"#,
            ))
            .await;

        let client = client_with_session(&transport, Arc::new(MemoryStore::new()));
        let page = client.feed_page(20, 10).await.unwrap();
        assert!(!page.has_more_list);

        let recorded = transport.recorded_requests().await;
        assert_eq!(recorded[0].url.query(), Some("cursor=20&limit=10"));
    }
}
