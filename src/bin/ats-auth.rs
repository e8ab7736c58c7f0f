use anyhow::Result;
use ats_auth::cli::start;

// Main function
#[tokio::main]
async fn main() -> Result<()> {
    // Start the program
    let (action, globals) = start()?;

    // Handle the action
    action.execute(&globals).await
}
