//! Post-login dashboard. Admins get a recruiter-creation form; recruiters get a
//! notice that user creation is admin-only.

use crate::{
    app::App,
    components::{AlertKind, Notice},
    features::auth::{
        screen::Field,
        types::{Credentials, UserRecord},
    },
};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

pub const RECRUITER_NOTICE: &str =
    "Recruiter access is active. Admin-only user creation is disabled for your role.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DashboardView {
    RecruiterForm,
    RecruiterNotice,
}

#[derive(Debug)]
pub struct Dashboard {
    user: UserRecord,
    username: String,
    password: SecretString,
    loading: bool,
}

impl Dashboard {
    #[must_use]
    pub fn new(user: UserRecord) -> Self {
        Self {
            user,
            username: String::new(),
            password: SecretString::default(),
            loading: false,
        }
    }

    #[must_use]
    pub fn user(&self) -> &UserRecord {
        &self.user
    }

    #[must_use]
    pub fn view(&self) -> DashboardView {
        if self.user.is_admin() {
            DashboardView::RecruiterForm
        } else {
            DashboardView::RecruiterNotice
        }
    }

    /// Header line, e.g. `Logged in as admin (admin)`.
    #[must_use]
    pub fn greeting(&self) -> String {
        format!("Logged in as {} ({})", self.user.username, self.user.role)
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        match field {
            Field::Username => self.username = value.into(),
            Field::Password => self.password = SecretString::from(value.into()),
        }
    }

    /// Submits the recruiter form. Clears the form on success and keeps the
    /// values on failure. Returns whether a recruiter was created.
    pub async fn submit_recruiter(&mut self, app: &App) -> bool {
        if self.view() != DashboardView::RecruiterForm || self.loading {
            debug!("recruiter form not available");
            return false;
        }

        let credentials = Credentials {
            username: self.username.clone(),
            password: SecretString::from(self.password.expose_secret().to_string()),
        };

        if !credentials.is_complete() {
            app.notifier().notify(Notice::new(
                AlertKind::Warning,
                "Missing fields",
                "Please fill username and password.",
            ));
            return false;
        }

        self.loading = true;
        let result = app.handle_create_recruiter(&credentials).await;
        self.loading = false;

        match result {
            Ok(_) => {
                app.notifier().notify(Notice::new(
                    AlertKind::Success,
                    "Recruiter Created",
                    format!("{} is ready to login.", credentials.username),
                ));
                self.username.clear();
                self.password = SecretString::default();
                true
            }
            Err(err) => {
                app.notifier()
                    .notify(Notice::new(AlertKind::Error, "Failed", err.to_string()));
                false
            }
        }
    }
}
