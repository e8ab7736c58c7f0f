//! Auth feature covering login, first-admin bootstrap, session persistence and
//! startup hydration. It keeps authentication logic out of the CLI layer. This
//! module touches security boundaries and must avoid logging secrets or token
//! material.
//!
//! Flow overview: login posts credentials and, on success, the token and user
//! are committed to the [`state::AuthContext`] and mirrored into storage
//! together. On startup, [`hydrate::hydrate_session`] re-validates whatever is
//! stored and silently falls back to an anonymous session.

pub mod client;
pub mod hydrate;
pub mod screen;
pub mod state;
pub mod storage;
pub mod types;

pub use hydrate::{hydrate_session, Hydration, HydrationState};
pub use screen::{AuthHandlers, AuthMode, AuthScreen, MobilePanel, Submission};
pub use state::{AuthContext, AuthProvider, Session};
pub use types::{Credentials, Role, UserRecord};
