//! Login / first-admin screen. The state is `AuthMode x MobilePanel x is_narrow`:
//!
//! - selecting a mode resets the mobile panel to `Form`;
//! - resizing only reclassifies the viewport;
//! - the panel toggles only apply on narrow viewports;
//! - submitting validates both fields before delegating to [`AuthHandlers`].
//!
//! The layout itself is derived from that state, see [`AuthScreen::visible_panels`].

use crate::{
    components::{AlertKind, Notice, Notifier},
    features::auth::types::Credentials,
};
use secrecy::{ExposeSecret, SecretString};
use std::future::Future;
use tracing::debug;

/// Viewports narrower than this show one panel at a time.
pub const NARROW_BREAKPOINT: u32 = 768;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    Login,
    Bootstrap,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MobilePanel {
    #[default]
    Form,
    Info,
}

/// Panels in rendering order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Panel {
    Info,
    Form,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Username,
    Password,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Password,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldConfig {
    pub field: Field,
    pub label: &'static str,
    pub kind: FieldKind,
    pub placeholder: &'static str,
}

/// Static copy and field set for one mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModeConfig {
    pub title: &'static str,
    pub submit_label: &'static str,
    pub headline: &'static str,
    pub copy: &'static str,
    pub fields: [FieldConfig; 2],
    pub footer: &'static str,
}

const LOGIN_CONFIG: ModeConfig = ModeConfig {
    title: "Sign In",
    submit_label: "Login",
    headline: "Welcome Back",
    copy: "Secure login for admin and recruiters. Built for company-only access with role-based controls.",
    fields: [
        FieldConfig {
            field: Field::Username,
            label: "Username",
            kind: FieldKind::Text,
            placeholder: "Enter username",
        },
        FieldConfig {
            field: Field::Password,
            label: "Password",
            kind: FieldKind::Password,
            placeholder: "Enter password",
        },
    ],
    footer: "Use your assigned company username and password.",
};

const BOOTSTRAP_CONFIG: ModeConfig = ModeConfig {
    title: "Register",
    submit_label: "Register",
    headline: "Create Admin Account",
    copy: "Register the first admin account. After this setup, use Login for daily authentication.",
    fields: [
        FieldConfig {
            field: Field::Username,
            label: "Admin Username",
            kind: FieldKind::Text,
            placeholder: "first admin user",
        },
        FieldConfig {
            field: Field::Password,
            label: "Admin Password",
            kind: FieldKind::Password,
            placeholder: "strong password",
        },
    ],
    footer: "Register once, then return to Login.",
};

impl AuthMode {
    #[must_use]
    pub fn config(self) -> &'static ModeConfig {
        match self {
            Self::Login => &LOGIN_CONFIG,
            Self::Bootstrap => &BOOTSTRAP_CONFIG,
        }
    }
}

/// Actions the screen delegates to once the form is valid.
///
/// Handlers report their own failures to the user; the returned flag only
/// tells the screen whether the action succeeded.
pub trait AuthHandlers {
    fn on_login(&self, credentials: Credentials) -> impl Future<Output = bool>;

    fn on_bootstrap(&self, credentials: Credentials) -> impl Future<Output = bool>;

    /// While `true` the submit control is disabled.
    fn is_submitting(&self) -> bool {
        false
    }
}

/// Result of a submit attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Submission {
    /// A request is already outstanding; nothing happened.
    Busy,
    /// A field was empty; the user was warned and no handler ran.
    Invalid,
    /// The handler ran and reported this outcome.
    Completed { mode: AuthMode, succeeded: bool },
}

#[derive(Debug, Default)]
struct FormValues {
    username: String,
    password: SecretString,
}

#[derive(Debug, Default)]
pub struct AuthScreen {
    mode: AuthMode,
    panel: MobilePanel,
    is_narrow: bool,
    values: FormValues,
}

impl AuthScreen {
    /// Starts in login mode, classifying the initial viewport width.
    #[must_use]
    pub fn new(viewport_width: u32) -> Self {
        Self {
            is_narrow: is_narrow(viewport_width),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    #[must_use]
    pub fn panel(&self) -> MobilePanel {
        self.panel
    }

    #[must_use]
    pub fn is_narrow(&self) -> bool {
        self.is_narrow
    }

    #[must_use]
    pub fn config(&self) -> &'static ModeConfig {
        self.mode.config()
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.values.username
    }

    /// "Login" / "Register" controls. Always returns to the form panel.
    pub fn select_mode(&mut self, mode: AuthMode) {
        debug!(?mode, "auth mode selected");
        self.mode = mode;
        self.panel = MobilePanel::Form;
    }

    pub fn resize(&mut self, viewport_width: u32) {
        self.is_narrow = is_narrow(viewport_width);
    }

    /// "Open Form" control, narrow viewports only.
    pub fn open_form(&mut self) {
        if self.is_narrow {
            self.panel = MobilePanel::Form;
        }
    }

    /// "Show Overview" control, narrow viewports only.
    pub fn show_overview(&mut self) {
        if self.is_narrow {
            self.panel = MobilePanel::Info;
        }
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        match field {
            Field::Username => self.values.username = value.into(),
            Field::Password => self.values.password = SecretString::from(value.into()),
        }
    }

    /// Panels to render, in order. Wide viewports show both, with the form
    /// first in login mode; narrow viewports show only the active panel.
    #[must_use]
    pub fn visible_panels(&self) -> Vec<Panel> {
        if self.is_narrow {
            return match self.panel {
                MobilePanel::Form => vec![Panel::Form],
                MobilePanel::Info => vec![Panel::Info],
            };
        }

        match self.mode {
            AuthMode::Login => vec![Panel::Form, Panel::Info],
            AuthMode::Bootstrap => vec![Panel::Info, Panel::Form],
        }
    }

    /// Validates the form and delegates to the handler for the current mode.
    ///
    /// After a successful bootstrap the screen returns to login mode; a failed
    /// bootstrap keeps the user on the bootstrap form with their values.
    pub async fn submit<H: AuthHandlers>(
        &mut self,
        handlers: &H,
        notifier: &dyn Notifier,
    ) -> Submission {
        if handlers.is_submitting() {
            return Submission::Busy;
        }

        let credentials = Credentials {
            username: self.values.username.clone(),
            password: SecretString::from(self.values.password.expose_secret().to_string()),
        };

        if !credentials.is_complete() {
            notifier.notify(Notice::new(
                AlertKind::Warning,
                "Missing fields",
                "Please fill username and password.",
            ));
            return Submission::Invalid;
        }

        let mode = self.mode;
        let succeeded = match mode {
            AuthMode::Login => handlers.on_login(credentials).await,
            AuthMode::Bootstrap => {
                let succeeded = handlers.on_bootstrap(credentials).await;
                if succeeded {
                    self.select_mode(AuthMode::Login);
                }
                succeeded
            }
        };

        Submission::Completed { mode, succeeded }
    }
}

fn is_narrow(viewport_width: u32) -> bool {
    viewport_width < NARROW_BREAKPOINT
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::alert::testing::RecordingNotifier;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[derive(Default)]
    struct FakeHandlers {
        logins: AtomicUsize,
        bootstraps: AtomicUsize,
        succeed: bool,
        busy: AtomicBool,
    }

    impl FakeHandlers {
        fn succeeding() -> Self {
            Self {
                succeed: true,
                ..Self::default()
            }
        }
    }

    impl AuthHandlers for FakeHandlers {
        async fn on_login(&self, _credentials: Credentials) -> bool {
            self.logins.fetch_add(1, Ordering::SeqCst);
            self.succeed
        }

        async fn on_bootstrap(&self, _credentials: Credentials) -> bool {
            self.bootstraps.fetch_add(1, Ordering::SeqCst);
            self.succeed
        }

        fn is_submitting(&self) -> bool {
            self.busy.load(Ordering::SeqCst)
        }
    }

    fn filled(mode: AuthMode, width: u32) -> AuthScreen {
        let mut screen = AuthScreen::new(width);
        screen.select_mode(mode);
        screen.set_field(Field::Username, "admin");
        screen.set_field(Field::Password, "pass");
        screen
    }

    #[test]
    fn defaults_to_login_form() {
        let screen = AuthScreen::new(1280);
        assert_eq!(screen.mode(), AuthMode::Login);
        assert_eq!(screen.panel(), MobilePanel::Form);
        assert!(!screen.is_narrow());
        assert_eq!(screen.config().title, "Sign In");
        assert_eq!(screen.config().headline, "Welcome Back");
    }

    #[test]
    fn register_switches_mode_and_resets_panel() {
        let mut screen = AuthScreen::new(400);
        screen.show_overview();
        assert_eq!(screen.panel(), MobilePanel::Info);

        screen.select_mode(AuthMode::Bootstrap);
        assert_eq!(screen.mode(), AuthMode::Bootstrap);
        assert_eq!(screen.panel(), MobilePanel::Form);
        assert_eq!(screen.config().title, "Register");
    }

    #[test]
    fn resize_only_reclassifies_viewport() {
        let mut screen = AuthScreen::new(400);
        screen.select_mode(AuthMode::Bootstrap);
        screen.show_overview();

        screen.resize(1024);
        assert!(!screen.is_narrow());
        assert_eq!(screen.mode(), AuthMode::Bootstrap);
        assert_eq!(screen.panel(), MobilePanel::Info);

        screen.resize(NARROW_BREAKPOINT - 1);
        assert!(screen.is_narrow());
        screen.resize(NARROW_BREAKPOINT);
        assert!(!screen.is_narrow());
    }

    #[test]
    fn panel_toggles_ignored_on_wide_viewports() {
        let mut screen = AuthScreen::new(1024);
        screen.show_overview();
        assert_eq!(screen.panel(), MobilePanel::Form);
    }

    #[test]
    fn visible_panels_follow_layout_rules() {
        let mut screen = AuthScreen::new(1024);
        assert_eq!(screen.visible_panels(), vec![Panel::Form, Panel::Info]);
        screen.select_mode(AuthMode::Bootstrap);
        assert_eq!(screen.visible_panels(), vec![Panel::Info, Panel::Form]);

        screen.resize(500);
        assert_eq!(screen.visible_panels(), vec![Panel::Form]);
        screen.show_overview();
        assert_eq!(screen.visible_panels(), vec![Panel::Info]);
        screen.open_form();
        assert_eq!(screen.visible_panels(), vec![Panel::Form]);
    }

    #[tokio::test]
    async fn blank_fields_never_reach_handlers() {
        let handlers = FakeHandlers::succeeding();
        let notifier = RecordingNotifier::default();

        for mode in [AuthMode::Login, AuthMode::Bootstrap] {
            let mut screen = AuthScreen::new(1024);
            screen.select_mode(mode);
            screen.set_field(Field::Username, "   ");
            screen.set_field(Field::Password, "pass");
            assert_eq!(screen.submit(&handlers, &notifier).await, Submission::Invalid);

            screen.set_field(Field::Username, "admin");
            screen.set_field(Field::Password, "");
            assert_eq!(screen.submit(&handlers, &notifier).await, Submission::Invalid);
            assert_eq!(screen.mode(), mode);
        }

        assert_eq!(handlers.logins.load(Ordering::SeqCst), 0);
        assert_eq!(handlers.bootstraps.load(Ordering::SeqCst), 0);

        let notices = notifier.notices();
        assert_eq!(notices.len(), 4);
        assert!(notices
            .iter()
            .all(|n| n.kind == AlertKind::Warning && n.title == "Missing fields"));
    }

    #[tokio::test]
    async fn login_submission_stays_in_login_mode() {
        let handlers = FakeHandlers::default();
        let notifier = RecordingNotifier::default();
        let mut screen = filled(AuthMode::Login, 1024);

        let outcome = screen.submit(&handlers, &notifier).await;
        assert_eq!(
            outcome,
            Submission::Completed {
                mode: AuthMode::Login,
                succeeded: false
            }
        );
        assert_eq!(handlers.logins.load(Ordering::SeqCst), 1);
        assert_eq!(screen.mode(), AuthMode::Login);
        assert!(notifier.notices().is_empty());
    }

    #[tokio::test]
    async fn successful_bootstrap_returns_to_login() {
        let handlers = FakeHandlers::succeeding();
        let notifier = RecordingNotifier::default();
        let mut screen = filled(AuthMode::Bootstrap, 500);

        let outcome = screen.submit(&handlers, &notifier).await;
        assert_eq!(
            outcome,
            Submission::Completed {
                mode: AuthMode::Bootstrap,
                succeeded: true
            }
        );
        assert_eq!(handlers.bootstraps.load(Ordering::SeqCst), 1);
        assert_eq!(screen.mode(), AuthMode::Login);
        assert_eq!(screen.panel(), MobilePanel::Form);
    }

    #[tokio::test]
    async fn failed_bootstrap_keeps_bootstrap_form() {
        let handlers = FakeHandlers::default();
        let notifier = RecordingNotifier::default();
        let mut screen = filled(AuthMode::Bootstrap, 1024);

        screen.submit(&handlers, &notifier).await;
        assert_eq!(screen.mode(), AuthMode::Bootstrap);
        assert_eq!(screen.username(), "admin");
    }

    #[tokio::test]
    async fn busy_handlers_block_submission() {
        let handlers = FakeHandlers::succeeding();
        handlers.busy.store(true, Ordering::SeqCst);
        let notifier = RecordingNotifier::default();
        let mut screen = filled(AuthMode::Login, 1024);

        assert_eq!(screen.submit(&handlers, &notifier).await, Submission::Busy);
        assert_eq!(handlers.logins.load(Ordering::SeqCst), 0);
    }
}
