use crate::cli::{actions::Action, commands, dispatch, globals::GlobalArgs};
use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

fn init_tracing(level: tracing::Level) -> Result<()> {
    // stdout carries command output, logs go to stderr
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(false);

    // RUST_LOG=
    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let subscriber = Registry::default().with(fmt_layer).with(env_filter);

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

/// Main entry point for the CLI - builds the action and its shared settings
///
/// # Errors
///
/// Returns an error if logging cannot be initialized or the arguments are inconsistent
pub fn start() -> Result<(Action, GlobalArgs)> {
    let matches = commands::new().get_matches();

    let verbosity = matches
        .get_one::<u8>(commands::logging::ARG_VERBOSITY)
        .copied()
        .unwrap_or(0);

    init_tracing(commands::logging::level_for(verbosity))?;

    dispatch::handler(&matches)
}
