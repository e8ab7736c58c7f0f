pub mod bootstrap;
pub mod login;
pub mod logout;
pub mod recruiter;
pub mod screen;
pub mod whoami;

mod run;

use crate::{
    cli::globals::GlobalArgs,
    features::auth::{screen::AuthMode, types::Credentials},
};

#[derive(Debug)]
pub enum Action {
    Login {
        credentials: Credentials,
    },
    BootstrapAdmin {
        credentials: Credentials,
    },
    Whoami,
    Logout,
    CreateRecruiter {
        credentials: Credentials,
    },
    Screen {
        columns: Option<u32>,
        mode: AuthMode,
        overview: bool,
    },
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self, globals: &GlobalArgs) -> anyhow::Result<()> {
        run::execute(self, globals).await
    }
}
