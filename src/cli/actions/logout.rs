use crate::cli::globals::GlobalArgs;
use anyhow::Result;

/// # Errors
/// Returns an error if the stored session cannot be removed.
pub fn execute(globals: &GlobalArgs) -> Result<()> {
    globals.app()?.handle_logout()?;
    Ok(())
}
