//! Client wrappers for the unauthenticated auth endpoints. These helpers keep
//! endpoint paths in one place and must never log the credential payload.

use crate::{
    app_lib::{ApiClient, AppError},
    features::auth::types::{AccountCreated, Credentials, LoginResponse},
};
use tracing::instrument;

const LOGIN_PATH: &str = "/api/auth/login";
const BOOTSTRAP_ADMIN_PATH: &str = "/api/auth/bootstrap-admin";

/// Exchanges credentials for an access token and the user record.
///
/// # Errors
/// Returns the API's error message (for example `invalid username or password`)
/// or a transport error.
#[instrument(skip_all, fields(username = %credentials.username))]
pub async fn login(api: &ApiClient, credentials: &Credentials) -> Result<LoginResponse, AppError> {
    api.post_json(LOGIN_PATH, credentials).await
}

/// Creates the first admin account. Fails once an admin exists.
///
/// # Errors
/// Returns the API's error message (for example `admin already exists`) or a transport error.
#[instrument(skip_all, fields(username = %credentials.username))]
pub async fn bootstrap_admin(
    api: &ApiClient,
    credentials: &Credentials,
) -> Result<AccountCreated, AppError> {
    api.post_json_with_headers_optional(BOOTSTRAP_ADMIN_PATH, credentials, &[])
        .await
}
