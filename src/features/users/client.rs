//! Client helpers for user endpoints. Both require a bearer token; the backend
//! enforces that only admins may create recruiters.

use crate::{
    app_lib::{api::bearer_header, ApiClient, AppError},
    features::auth::types::{AccountCreated, Credentials, UserRecord},
};
use secrecy::SecretString;
use tracing::instrument;

const CURRENT_USER_PATH: &str = "/api/users/me";
const RECRUITERS_PATH: &str = "/api/users/recruiters";

/// Fetches the user the token belongs to. Used to re-validate stored sessions.
///
/// # Errors
/// Returns `AppError::Http` when the token is rejected, or a transport/parse error.
#[instrument(skip_all)]
pub async fn get_current_user(api: &ApiClient, token: &SecretString) -> Result<UserRecord, AppError> {
    api.get_json_with_headers(CURRENT_USER_PATH, &[bearer_header(token)])
        .await
}

/// Creates a recruiter account on behalf of an admin.
///
/// # Errors
/// Returns the API's error message (for example `forbidden` or
/// `username already exists`) or a transport error.
#[instrument(skip_all, fields(username = %credentials.username))]
pub async fn create_recruiter(
    api: &ApiClient,
    credentials: &Credentials,
    token: &SecretString,
) -> Result<AccountCreated, AppError> {
    api.post_json_with_headers_optional(RECRUITERS_PATH, credentials, &[bearer_header(token)])
        .await
}
