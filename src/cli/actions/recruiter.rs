use crate::{
    app::{AppView, SESSION_EXPIRED},
    cli::globals::GlobalArgs,
    features::auth::{screen::Field, types::Credentials},
    features::users::{dashboard::RECRUITER_NOTICE, Dashboard, DashboardView},
};
use anyhow::{bail, Result};
use secrecy::ExposeSecret;

/// Creates a recruiter from the admin dashboard of the stored session.
///
/// # Errors
/// Returns an error without a valid admin session or when the API refuses.
pub async fn execute(credentials: Credentials, globals: &GlobalArgs) -> Result<()> {
    let mut app = globals.app()?;
    app.hydrate().await;

    let AppView::Dashboard(user) = app.view() else {
        bail!(SESSION_EXPIRED);
    };

    let mut dashboard = Dashboard::new(user);
    if dashboard.view() == DashboardView::RecruiterNotice {
        bail!(RECRUITER_NOTICE);
    }

    dashboard.set_field(Field::Username, credentials.username.clone());
    dashboard.set_field(Field::Password, credentials.password.expose_secret());

    if !dashboard.submit_recruiter(&app).await {
        bail!("recruiter was not created");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cli::actions::testing::{can_bind_localhost, globals, seed_session, user},
        features::auth::types::Role,
    };
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount_recruiters(server: &MockServer, calls: u64) {
        Mock::given(method("POST"))
            .and(path("/api/users/recruiters"))
            .and(header("Authorization", "Bearer tok"))
            .and(body_json(json!({ "username": "rita", "password": "temp" })))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(json!({ "message": "recruiter created" })),
            )
            .expect(calls)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn admin_creates_recruiter() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        mount_recruiters(&server, 1).await;
        let dir = tempfile::tempdir()?;
        let globals = globals(&server, dir.path());
        seed_session(&server, &globals, "tok", &user("boss", Role::Admin)).await?;

        execute(Credentials::new("rita", "temp"), &globals).await?;
        Ok(())
    }

    #[tokio::test]
    async fn recruiter_account_is_refused() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        mount_recruiters(&server, 0).await;
        let dir = tempfile::tempdir()?;
        let globals = globals(&server, dir.path());
        seed_session(&server, &globals, "tok", &user("rita", Role::Recruiter)).await?;

        let err = execute(Credentials::new("rita", "temp"), &globals)
            .await
            .err();
        assert_eq!(
            err.map(|err| err.to_string()).as_deref(),
            Some(RECRUITER_NOTICE)
        );
        Ok(())
    }

    #[tokio::test]
    async fn missing_session_is_expired() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        mount_recruiters(&server, 0).await;
        let dir = tempfile::tempdir()?;
        let globals = globals(&server, dir.path());

        let err = execute(Credentials::new("rita", "temp"), &globals)
            .await
            .err();
        assert_eq!(
            err.map(|err| err.to_string()).as_deref(),
            Some(SESSION_EXPIRED)
        );
        Ok(())
    }

    #[tokio::test]
    async fn api_refusal_fails() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/users/recruiters"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({ "error": "username already exists" })),
            )
            .mount(&server)
            .await;
        let dir = tempfile::tempdir()?;
        let globals = globals(&server, dir.path());
        seed_session(&server, &globals, "tok", &user("boss", Role::Admin)).await?;

        assert!(execute(Credentials::new("rita", "temp"), &globals)
            .await
            .is_err());
        Ok(())
    }
}
