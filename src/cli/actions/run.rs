use crate::cli::{
    actions::{bootstrap, login, logout, recruiter, screen, whoami, Action},
    globals::GlobalArgs,
};
use anyhow::Result;

/// Execute the provided action.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action, globals: &GlobalArgs) -> Result<()> {
    match action {
        Action::Login { credentials } => login::execute(credentials, globals).await,
        Action::BootstrapAdmin { credentials } => bootstrap::execute(credentials, globals).await,
        Action::Whoami => whoami::execute(globals).await,
        Action::Logout => logout::execute(globals),
        Action::CreateRecruiter { credentials } => recruiter::execute(credentials, globals).await,
        Action::Screen {
            columns,
            mode,
            overview,
        } => {
            screen::execute(columns, mode, overview);
            Ok(())
        }
    }
}
