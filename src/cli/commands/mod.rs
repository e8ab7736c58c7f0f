pub mod api;
pub mod logging;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ArgAction, ColorChoice, Command,
};

pub const CMD_LOGIN: &str = "login";
pub const CMD_BOOTSTRAP_ADMIN: &str = "bootstrap-admin";
pub const CMD_WHOAMI: &str = "whoami";
pub const CMD_LOGOUT: &str = "logout";
pub const CMD_CREATE_RECRUITER: &str = "create-recruiter";
pub const CMD_SCREEN: &str = "screen";

pub const ARG_USERNAME: &str = "username";
pub const ARG_PASSWORD: &str = "password";
pub const ARG_COLUMNS: &str = "columns";
pub const ARG_MODE: &str = "mode";
pub const ARG_OVERVIEW: &str = "overview";

fn credential_args(command: Command, username_help: &'static str) -> Command {
    command
        .arg(
            Arg::new(ARG_USERNAME)
                .short('u')
                .long(ARG_USERNAME)
                .help(username_help)
                .required(true),
        )
        .arg(
            Arg::new(ARG_PASSWORD)
                .short('p')
                .long(ARG_PASSWORD)
                .help("Password")
                .env("ATS_AUTH_PASSWORD")
                .hide_env_values(true)
                .required(true),
        )
}

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("ats-auth")
        .about("Resume ATS authentication client")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(credential_args(
            Command::new(CMD_LOGIN).about("Sign in and store the session"),
            "Username",
        ))
        .subcommand(credential_args(
            Command::new(CMD_BOOTSTRAP_ADMIN)
                .about("Register the first admin account (only works once)"),
            "Admin username",
        ))
        .subcommand(Command::new(CMD_WHOAMI).about("Validate the stored session and show the user"))
        .subcommand(Command::new(CMD_LOGOUT).about("Forget the stored session"))
        .subcommand(credential_args(
            Command::new(CMD_CREATE_RECRUITER)
                .about("Create a recruiter account (admin only)"),
            "Recruiter username",
        ))
        .subcommand(
            Command::new(CMD_SCREEN)
                .about("Render the sign-in screen layout")
                .arg(
                    Arg::new(ARG_COLUMNS)
                        .long(ARG_COLUMNS)
                        .help("Terminal width in columns")
                        .env("COLUMNS")
                        .value_parser(clap::value_parser!(u32)),
                )
                .arg(
                    Arg::new(ARG_MODE)
                        .long(ARG_MODE)
                        .help("Which form to show")
                        .value_parser(["login", "register"])
                        .default_value("login"),
                )
                .arg(
                    Arg::new(ARG_OVERVIEW)
                        .long(ARG_OVERVIEW)
                        .help("On narrow terminals, show the overview panel instead of the form")
                        .action(ArgAction::SetTrue),
                ),
        );

    let command = api::with_args(command);
    logging::with_args(command)
}
