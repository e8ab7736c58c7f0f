//! Maps parsed command-line arguments to an [`Action`] plus the settings every
//! action shares.

use crate::{
    app_lib::AppConfig,
    cli::{
        actions::Action,
        commands::{
            api, ARG_COLUMNS, ARG_MODE, ARG_OVERVIEW, ARG_PASSWORD, ARG_USERNAME,
            CMD_BOOTSTRAP_ADMIN, CMD_CREATE_RECRUITER, CMD_LOGIN, CMD_LOGOUT, CMD_SCREEN,
            CMD_WHOAMI,
        },
        globals::GlobalArgs,
    },
    features::auth::{screen::AuthMode, types::Credentials},
};
use anyhow::{anyhow, Context, Result};

fn credentials(sub_m: &clap::ArgMatches) -> Result<Credentials> {
    let username = sub_m
        .get_one::<String>(ARG_USERNAME)
        .cloned()
        .context("missing required argument: --username")?;
    let password = sub_m
        .get_one::<String>(ARG_PASSWORD)
        .cloned()
        .context("missing required argument: --password")?;

    Ok(Credentials::new(username, password))
}

/// # Errors
/// Returns an error if required arguments are missing or the configuration is invalid.
pub fn handler(matches: &clap::ArgMatches) -> Result<(Action, GlobalArgs)> {
    let api_opts = api::Options::parse(matches);
    let config = AppConfig::load(api_opts.api_url.as_deref(), api_opts.session_file)?;
    let globals = GlobalArgs::new(config);

    let action = match matches.subcommand() {
        Some((CMD_LOGIN, sub_m)) => Action::Login {
            credentials: credentials(sub_m)?,
        },
        Some((CMD_BOOTSTRAP_ADMIN, sub_m)) => Action::BootstrapAdmin {
            credentials: credentials(sub_m)?,
        },
        Some((CMD_WHOAMI, _)) => Action::Whoami,
        Some((CMD_LOGOUT, _)) => Action::Logout,
        Some((CMD_CREATE_RECRUITER, sub_m)) => Action::CreateRecruiter {
            credentials: credentials(sub_m)?,
        },
        Some((CMD_SCREEN, sub_m)) => Action::Screen {
            columns: sub_m.get_one::<u32>(ARG_COLUMNS).copied(),
            mode: match sub_m.get_one::<String>(ARG_MODE).map(String::as_str) {
                Some("register") => AuthMode::Bootstrap,
                _ => AuthMode::Login,
            },
            overview: sub_m.get_flag(ARG_OVERVIEW),
        },
        Some((name, _)) => return Err(anyhow!("unknown command: {name}")),
        None => return Err(anyhow!("missing command")),
    };

    Ok((action, globals))
}
