use crate::{
    app::AppView,
    cli::globals::GlobalArgs,
    features::users::{dashboard::RECRUITER_NOTICE, Dashboard, DashboardView},
};
use anyhow::{bail, Result};

/// Dashboard header for the stored session, plus the recruiter notice when it applies.
///
/// # Errors
/// Returns an error when there is no valid session.
pub async fn report(globals: &GlobalArgs) -> Result<Vec<String>> {
    let mut app = globals.app()?;
    app.hydrate().await;

    let AppView::Dashboard(user) = app.view() else {
        bail!("not logged in");
    };

    let dashboard = Dashboard::new(user);
    let mut lines = vec![dashboard.greeting()];
    if dashboard.view() == DashboardView::RecruiterNotice {
        lines.push(RECRUITER_NOTICE.to_string());
    }
    Ok(lines)
}

/// Restores the stored session and prints the dashboard header.
///
/// # Errors
/// Returns an error when there is no valid session.
pub async fn execute(globals: &GlobalArgs) -> Result<()> {
    for line in report(globals).await? {
        println!("{line}");
    }
    Ok(())
}
