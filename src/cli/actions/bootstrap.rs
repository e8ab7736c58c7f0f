use crate::{
    cli::{
        actions::{login::submit_form, screen::viewport_width},
        globals::GlobalArgs,
    },
    features::auth::{
        screen::{AuthMode, AuthScreen, Submission},
        types::Credentials,
    },
};
use anyhow::{bail, Result};

/// # Errors
/// Returns an error if the credentials are incomplete or the API refuses the setup.
pub async fn execute(credentials: Credentials, globals: &GlobalArgs) -> Result<()> {
    let app = globals.app()?;
    let mut screen = AuthScreen::new(viewport_width(None));
    screen.select_mode(AuthMode::Bootstrap);

    match submit_form(&app, &mut screen, &credentials).await {
        Submission::Completed {
            succeeded: true, ..
        } if screen.mode() == AuthMode::Login => {
            println!("Next: ats-auth login --username {}", credentials.username);
            Ok(())
        }
        _ => bail!("admin setup failed"),
    }
}
