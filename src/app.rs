//! Application shell. Owns the session provider, the session store, the API
//! client and the notifier, and implements the interactive handlers the
//! screens delegate to. Interactive failures are reported through the
//! notifier; hydration failures are not.

use crate::{
    app_lib::{ApiClient, AppError},
    components::{AlertKind, Notice, Notifier},
    features::auth::{
        client,
        hydrate::{hydrate_session, Hydration, HydrationState},
        screen::AuthHandlers,
        state::{AuthContext, AuthProvider},
        storage::{clear_session, save_session, KeyValueStore},
        types::{AccountCreated, Credentials, UserRecord},
    },
    features::users::client::create_recruiter,
};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use tracing::{info, instrument};

pub const SESSION_EXPIRED: &str = "Session expired. Please login again.";

/// What the client should show right now.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppView {
    Loading,
    Auth,
    Dashboard(UserRecord),
}

/// Holds the submitting flag for the lifetime of a request and clears it on
/// every exit path.
struct SubmittingGuard<'a>(&'a AtomicBool);

impl<'a> SubmittingGuard<'a> {
    fn engage(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct App {
    provider: AuthProvider,
    store: Arc<dyn KeyValueStore>,
    api: ApiClient,
    notifier: Arc<dyn Notifier>,
    hydration: Hydration,
    submitting: AtomicBool,
}

impl App {
    #[must_use]
    pub fn new(api: ApiClient, store: Arc<dyn KeyValueStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            provider: AuthProvider::new(),
            store,
            api,
            notifier,
            hydration: Hydration::new(),
            submitting: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn auth(&self) -> AuthContext {
        self.provider.context()
    }

    #[must_use]
    pub fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }

    #[must_use]
    pub fn hydration_state(&self) -> HydrationState {
        self.hydration.state()
    }

    /// Restores the stored session. Runs the flow once; later calls return the
    /// resolved state.
    pub async fn hydrate(&mut self) -> HydrationState {
        if self.hydration.is_loading() {
            let outcome = hydrate_session(self.store.as_ref(), &self.api, &self.auth()).await;
            self.hydration.resolve(outcome);
        }
        self.hydration.state()
    }

    #[must_use]
    pub fn view(&self) -> AppView {
        if self.hydration.is_loading() {
            return AppView::Loading;
        }

        match self.auth().user() {
            Ok(Some(user)) => AppView::Dashboard(user),
            _ => AppView::Auth,
        }
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    /// Logs in, then persists and commits the session together.
    #[instrument(skip_all, fields(username = %credentials.username))]
    pub async fn handle_login(&self, credentials: Credentials) -> bool {
        let _submitting = SubmittingGuard::engage(&self.submitting);

        match self.login(&credentials).await {
            Ok(user) => {
                info!("logged in");
                self.notifier.notify(Notice::new(
                    AlertKind::Success,
                    "Welcome",
                    format!("Logged in as {}", user.username),
                ));
                true
            }
            Err(err) => {
                self.notifier.notify(Notice::new(
                    AlertKind::Error,
                    "Login failed",
                    err.to_string(),
                ));
                false
            }
        }
    }

    async fn login(&self, credentials: &Credentials) -> Result<UserRecord, AppError> {
        let response = client::login(&self.api, credentials).await?;
        save_session(self.store.as_ref(), &response.access_token, &response.user)?;
        self.auth()
            .set_session(response.access_token, response.user.clone())?;
        Ok(response.user)
    }

    /// Creates the first admin. Does not log in.
    #[instrument(skip_all, fields(username = %credentials.username))]
    pub async fn handle_bootstrap(&self, credentials: Credentials) -> bool {
        let _submitting = SubmittingGuard::engage(&self.submitting);

        match client::bootstrap_admin(&self.api, &credentials).await {
            Ok(_) => {
                info!("first admin created");
                self.notifier.notify(Notice::new(
                    AlertKind::Success,
                    "Admin created",
                    "You can now login with the admin credentials.",
                ));
                true
            }
            Err(err) => {
                self.notifier.notify(Notice::new(
                    AlertKind::Error,
                    "Setup failed",
                    err.to_string(),
                ));
                false
            }
        }
    }

    /// Creates a recruiter with the current session's token.
    ///
    /// # Errors
    /// Fails with "Session expired. Please login again." when there is no
    /// session, otherwise with the API's error.
    #[instrument(skip_all, fields(username = %credentials.username))]
    pub async fn handle_create_recruiter(
        &self,
        credentials: &Credentials,
    ) -> Result<AccountCreated, AppError> {
        let token = self
            .auth()
            .token()?
            .ok_or_else(|| AppError::Validation(SESSION_EXPIRED.to_string()))?;

        create_recruiter(&self.api, credentials, &token).await
    }

    /// Ends the session locally. The API has no logout endpoint.
    ///
    /// # Errors
    /// Returns a storage or context error; the in-memory session is cleared
    /// even when storage cannot be.
    pub fn handle_logout(&self) -> Result<(), AppError> {
        let cleared = clear_session(self.store.as_ref());
        self.auth().clear_auth()?;
        cleared?;

        self.notifier.notify(Notice::new(
            AlertKind::Info,
            "Logged out",
            "Session ended successfully.",
        ));
        Ok(())
    }
}

impl AuthHandlers for App {
    async fn on_login(&self, credentials: Credentials) -> bool {
        self.handle_login(credentials).await
    }

    async fn on_bootstrap(&self, credentials: Credentials) -> bool {
        self.handle_bootstrap(credentials).await
    }

    fn is_submitting(&self) -> bool {
        App::is_submitting(self)
    }
}
