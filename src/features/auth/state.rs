//! In-memory auth session shared with the rest of the client. One
//! [`AuthProvider`] owns the session for the lifetime of the process and hands
//! out [`AuthContext`] handles that are passed explicitly to whoever needs to
//! read or replace it. Nothing here touches disk; mirroring the session into
//! durable storage is the caller's job (see `storage`).

use crate::{app_lib::AppError, features::auth::types::UserRecord};
use secrecy::SecretString;
use std::sync::{Arc, RwLock, Weak};

const OUTSIDE_PROVIDER: &str = "AuthContext must be used within AuthProvider";

/// Token and the user it identifies. Never one without the other.
#[derive(Clone, Debug)]
pub struct Session {
    pub token: SecretString,
    pub user: UserRecord,
}

type SessionCell = RwLock<Option<Session>>;

/// Owner of the session state.
#[derive(Debug, Default)]
pub struct AuthProvider {
    session: Arc<SessionCell>,
}

impl AuthProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a handle bound to this provider. The handle fails once the
    /// provider is dropped.
    #[must_use]
    pub fn context(&self) -> AuthContext {
        AuthContext {
            session: Arc::downgrade(&self.session),
        }
    }
}

/// Handle to the provider's session.
#[derive(Clone, Debug)]
pub struct AuthContext {
    session: Weak<SessionCell>,
}

impl AuthContext {
    /// A handle that was never attached to a provider. Every access fails.
    #[must_use]
    pub fn detached() -> Self {
        Self {
            session: Weak::new(),
        }
    }

    fn cell(&self) -> Result<Arc<SessionCell>, AppError> {
        self.session
            .upgrade()
            .ok_or_else(|| AppError::Context(OUTSIDE_PROVIDER.to_string()))
    }

    /// Current session, if any. Side-effect free.
    ///
    /// # Errors
    /// Returns `AppError::Context` when used outside a live provider.
    pub fn session(&self) -> Result<Option<Session>, AppError> {
        let cell = self.cell()?;
        let guard = cell
            .read()
            .map_err(|_| AppError::Context("auth session lock poisoned".to_string()))?;
        Ok(guard.clone())
    }

    /// # Errors
    /// Returns `AppError::Context` when used outside a live provider.
    pub fn token(&self) -> Result<Option<SecretString>, AppError> {
        Ok(self.session()?.map(|session| session.token))
    }

    /// # Errors
    /// Returns `AppError::Context` when used outside a live provider.
    pub fn user(&self) -> Result<Option<UserRecord>, AppError> {
        Ok(self.session()?.map(|session| session.user))
    }

    /// # Errors
    /// Returns `AppError::Context` when used outside a live provider.
    pub fn is_authenticated(&self) -> Result<bool, AppError> {
        Ok(self.session()?.is_some())
    }

    /// Replaces token and user in a single update.
    ///
    /// # Errors
    /// Returns `AppError::Context` when used outside a live provider.
    pub fn set_session(&self, token: SecretString, user: UserRecord) -> Result<(), AppError> {
        self.replace(Some(Session { token, user }))
    }

    /// Resets the session to anonymous.
    ///
    /// # Errors
    /// Returns `AppError::Context` when used outside a live provider.
    pub fn clear_auth(&self) -> Result<(), AppError> {
        self.replace(None)
    }

    fn replace(&self, next: Option<Session>) -> Result<(), AppError> {
        let cell = self.cell()?;
        let mut guard = cell
            .write()
            .map_err(|_| AppError::Context("auth session lock poisoned".to_string()))?;
        *guard = next;
        Ok(())
    }
}
