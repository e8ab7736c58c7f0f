//! Startup session hydration. A stored token is never trusted as-is: it is
//! re-validated against `/api/users/me` and the user record from the API
//! replaces the cached one. Every failure on this path is swallowed and ends
//! in a clean anonymous state; nothing here may produce a user-facing notice.

use crate::{
    app_lib::{ApiClient, AppError},
    features::{
        auth::{
            state::AuthContext,
            storage::{clear_session, load_session, save_session, KeyValueStore},
        },
        users::client::get_current_user,
    },
};
use tracing::{debug, instrument, warn};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HydrationState {
    #[default]
    Loading,
    Anonymous,
    Authenticated,
}

/// Tracks the one-way `Loading -> Anonymous | Authenticated` transition.
#[derive(Clone, Copy, Debug, Default)]
pub struct Hydration {
    state: HydrationState,
}

impl Hydration {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> HydrationState {
        self.state
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state == HydrationState::Loading
    }

    /// Records the outcome. Only the first resolution counts and `Loading` is
    /// not a valid outcome; returns whether the state changed.
    pub fn resolve(&mut self, outcome: HydrationState) -> bool {
        if !self.is_loading() || outcome == HydrationState::Loading {
            return false;
        }
        self.state = outcome;
        true
    }
}

/// Restores the persisted session, if any, and validates it.
///
/// - no stored token: `Anonymous`, no network call;
/// - token accepted: the context holds the stored token and the user returned
///   by the API, and storage is refreshed with that user;
/// - no usable API URL: `Anonymous`, storage kept since the token was never
///   checked;
/// - anything else: storage is cleared and the context is left anonymous.
#[instrument(skip_all)]
pub async fn hydrate_session(
    store: &dyn KeyValueStore,
    api: &ApiClient,
    auth: &AuthContext,
) -> HydrationState {
    let stored = match load_session(store) {
        Ok(Some(stored)) => stored,
        Ok(None) => {
            debug!("no stored session");
            return HydrationState::Anonymous;
        }
        Err(err) => {
            warn!("failed to read stored session: {err}");
            return HydrationState::Anonymous;
        }
    };

    let committed = match get_current_user(api, &stored.token).await {
        Ok(user) => {
            if let Err(err) = save_session(store, &stored.token, &user) {
                warn!("failed to refresh stored user record: {err}");
            }
            auth.set_session(stored.token, user)
        }
        Err(err) => Err(err),
    };

    match committed {
        Ok(()) => {
            debug!("stored session validated");
            HydrationState::Authenticated
        }
        Err(err @ AppError::Config(_)) => {
            warn!("stored session not validated: {err}");
            HydrationState::Anonymous
        }
        Err(err) => {
            debug!("discarding stored session: {err}");
            if let Err(err) = clear_session(store) {
                warn!("failed to clear stored session: {err}");
            }
            // The context may be gone as well; anonymous either way.
            let _ = auth.clear_auth();
            HydrationState::Anonymous
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::{
        state::AuthProvider,
        storage::{MemoryStore, TOKEN_KEY, USER_KEY},
        types::{Role, UserRecord},
    };
    use anyhow::Result;
    use secrecy::{ExposeSecret, SecretString};
    use serde_json::json;
    use std::net::TcpListener;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    fn cached_user() -> UserRecord {
        UserRecord {
            id: 1,
            username: "old-name".to_string(),
            role: Role::Recruiter,
        }
    }

    fn seeded_store() -> Result<MemoryStore> {
        let store = MemoryStore::new();
        save_session(
            &store,
            &SecretString::from("stored-token".to_string()),
            &cached_user(),
        )?;
        Ok(store)
    }

    #[test]
    fn hydration_resolves_once() {
        let mut hydration = Hydration::new();
        assert!(hydration.is_loading());
        assert!(!hydration.resolve(HydrationState::Loading));
        assert!(hydration.resolve(HydrationState::Anonymous));
        assert!(!hydration.resolve(HydrationState::Authenticated));
        assert_eq!(hydration.state(), HydrationState::Anonymous);
    }

    #[tokio::test]
    async fn no_token_resolves_anonymous_without_network() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/users/me"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let store = MemoryStore::new();
        let provider = AuthProvider::new();
        let auth = provider.context();
        let api = ApiClient::new(&server.uri())?;

        let state = hydrate_session(&store, &api, &auth).await;
        assert_eq!(state, HydrationState::Anonymous);
        assert!(!auth.is_authenticated()?);
        Ok(())
    }

    #[tokio::test]
    async fn accepted_token_commits_fresh_user() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/users/me"))
            .and(header("Authorization", "Bearer stored-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 1, "username": "new-name", "role": "admin"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let store = seeded_store()?;
        let provider = AuthProvider::new();
        let auth = provider.context();
        let api = ApiClient::new(&server.uri())?;

        let state = hydrate_session(&store, &api, &auth).await;
        assert_eq!(state, HydrationState::Authenticated);

        let session = auth.session()?.ok_or_else(|| anyhow::anyhow!("no session"))?;
        assert_eq!(session.token.expose_secret(), "stored-token");
        assert_eq!(session.user.username, "new-name");
        assert_eq!(session.user.role, Role::Admin);

        let stored = load_session(&store)?.ok_or_else(|| anyhow::anyhow!("no stored session"))?;
        assert_eq!(stored.user.username, "new-name");
        Ok(())
    }

    #[tokio::test]
    async fn rejected_token_clears_storage() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/users/me"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({ "error": "invalid or expired token" })),
            )
            .mount(&server)
            .await;

        let store = seeded_store()?;
        let provider = AuthProvider::new();
        let auth = provider.context();
        let api = ApiClient::new(&server.uri())?;

        let state = hydrate_session(&store, &api, &auth).await;
        assert_eq!(state, HydrationState::Anonymous);
        assert!(!auth.is_authenticated()?);
        assert_eq!(store.get(TOKEN_KEY)?, None);
        assert_eq!(store.get(USER_KEY)?, None);
        Ok(())
    }

    #[tokio::test]
    async fn malformed_user_response_clears_storage() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/users/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "nope" })))
            .mount(&server)
            .await;

        let store = seeded_store()?;
        let provider = AuthProvider::new();
        let auth = provider.context();
        let api = ApiClient::new(&server.uri())?;

        let state = hydrate_session(&store, &api, &auth).await;
        assert_eq!(state, HydrationState::Anonymous);
        assert!(load_session(&store)?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn missing_base_url_keeps_stored_session() -> Result<()> {
        let store = seeded_store()?;
        let provider = AuthProvider::new();
        let auth = provider.context();
        let api = ApiClient::new("")?;

        let state = hydrate_session(&store, &api, &auth).await;
        assert_eq!(state, HydrationState::Anonymous);
        assert!(!auth.is_authenticated()?);

        let stored = load_session(&store)?.ok_or_else(|| anyhow::anyhow!("session was cleared"))?;
        assert_eq!(stored.token.expose_secret(), "stored-token");
        assert_eq!(stored.user, cached_user());
        Ok(())
    }

    #[tokio::test]
    async fn unreachable_api_clears_storage() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let port = TcpListener::bind("127.0.0.1:0")?.local_addr()?.port();

        let store = seeded_store()?;
        let provider = AuthProvider::new();
        let auth = provider.context();
        let api = ApiClient::new(&format!("http://127.0.0.1:{port}"))?;

        let state = hydrate_session(&store, &api, &auth).await;
        assert_eq!(state, HydrationState::Anonymous);
        assert!(load_session(&store)?.is_none());
        Ok(())
    }
}
