use clap::{builder::ValueParser, Arg, ArgAction, Command};
use tracing::Level;

pub const ARG_VERBOSITY: &str = "verbosity";

/// Accepted `ATS_AUTH_LOG_LEVEL` names; the index is the `-v` count.
const LEVELS: [(&str, Level); 5] = [
    ("error", Level::ERROR),
    ("warn", Level::WARN),
    ("info", Level::INFO),
    ("debug", Level::DEBUG),
    ("trace", Level::TRACE),
];

/// Tracing level for a `-v` count. Counts past the table saturate at `TRACE`.
#[must_use]
pub fn level_for(verbosity: u8) -> Level {
    LEVELS
        .get(usize::from(verbosity))
        .map_or(Level::TRACE, |(_, level)| *level)
}

fn parse_level(value: &str) -> Result<u8, String> {
    let value = value.trim();
    if let Ok(count) = value.parse::<u8>() {
        return if usize::from(count) < LEVELS.len() {
            Ok(count)
        } else {
            Err(format!("log level must be below {}", LEVELS.len()))
        };
    }

    LEVELS
        .iter()
        .position(|(name, _)| name.eq_ignore_ascii_case(value))
        .and_then(|index| u8::try_from(index).ok())
        .ok_or_else(|| format!("unknown log level {value}, expected error|warn|info|debug|trace"))
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_VERBOSITY)
            .short('v')
            .long("verbose")
            .help("More output per occurrence: -v warn, -vv info, -vvv debug, -vvvv trace")
            .env("ATS_AUTH_LOG_LEVEL")
            .global(true)
            .action(ArgAction::Count)
            .value_parser(ValueParser::new(parse_level)),
    )
}
