//! Current-user lookup, recruiter creation, and the post-login dashboard.

pub mod client;
pub mod dashboard;

pub use dashboard::{Dashboard, DashboardView};
