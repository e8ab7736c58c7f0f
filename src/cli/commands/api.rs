use clap::{Arg, Command};
use std::path::PathBuf;

pub const ARG_API_URL: &str = "api-url";
pub const ARG_SESSION_FILE: &str = "session-file";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_API_URL)
                .long(ARG_API_URL)
                .help("Base URL of the ATS API, example: https://ats.example.com")
                .long_help(
                    "Base URL of the ATS API. Request paths such as /api/auth/login are appended to it. Leave unset to send paths as given.",
                )
                .env("ATS_AUTH_API_URL")
                .global(true),
        )
        .arg(
            Arg::new(ARG_SESSION_FILE)
                .long(ARG_SESSION_FILE)
                .help("Where the session token and user record are kept")
                .env("ATS_AUTH_SESSION_FILE")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
}

#[derive(Debug)]
pub struct Options {
    pub api_url: Option<String>,
    pub session_file: Option<PathBuf>,
}

impl Options {
    #[must_use]
    pub fn parse(matches: &clap::ArgMatches) -> Self {
        Self {
            api_url: matches.get_one::<String>(ARG_API_URL).cloned(),
            session_file: matches.get_one::<PathBuf>(ARG_SESSION_FILE).cloned(),
        }
    }
}
