use crate::{
    app::App,
    cli::{actions::screen::viewport_width, globals::GlobalArgs},
    features::auth::screen::{AuthScreen, Field, Submission},
    features::auth::types::Credentials,
};
use anyhow::{bail, Result};
use secrecy::ExposeSecret;

/// Fills the login form and submits it through the app shell.
pub(crate) async fn submit_form(
    app: &App,
    screen: &mut AuthScreen,
    credentials: &Credentials,
) -> Submission {
    screen.set_field(Field::Username, credentials.username.clone());
    screen.set_field(Field::Password, credentials.password.expose_secret());
    screen.submit(app, app.notifier()).await
}

/// # Errors
/// Returns an error if the credentials are incomplete or rejected.
pub async fn execute(credentials: Credentials, globals: &GlobalArgs) -> Result<()> {
    let app = globals.app()?;
    let mut screen = AuthScreen::new(viewport_width(None));

    match submit_form(&app, &mut screen, &credentials).await {
        Submission::Completed {
            succeeded: true, ..
        } => {
            println!("Session saved to {}", globals.config.session_file.display());
            Ok(())
        }
        _ => bail!("login failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::actions::testing::{can_bind_localhost, globals, stored_session};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn accepted_login_is_stored() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .and(body_json(json!({ "username": "admin", "password": "pass" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "abc",
                "user": { "id": 1, "username": "admin", "role": "admin" }
            })))
            .expect(1)
            .mount(&server)
            .await;
        let dir = tempfile::tempdir()?;
        let globals = globals(&server, dir.path());

        execute(Credentials::new("admin", "pass"), &globals).await?;

        let stored = stored_session(&globals)?.ok_or_else(|| anyhow::anyhow!("not stored"))?;
        assert_eq!(stored.token.expose_secret(), "abc");
        assert_eq!(stored.user.username, "admin");
        Ok(())
    }

    #[tokio::test]
    async fn rejected_login_fails() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({ "error": "invalid username or password" })),
            )
            .mount(&server)
            .await;
        let dir = tempfile::tempdir()?;
        let globals = globals(&server, dir.path());

        let result = execute(Credentials::new("admin", "bad"), &globals).await;
        assert!(result.is_err());
        assert!(stored_session(&globals)?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn blank_password_sends_nothing() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        let dir = tempfile::tempdir()?;
        let globals = globals(&server, dir.path());

        assert!(execute(Credentials::new("admin", "  "), &globals)
            .await
            .is_err());
        Ok(())
    }
}
