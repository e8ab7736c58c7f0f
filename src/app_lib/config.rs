//! Client configuration: the API base URL and the location of the persisted
//! session. Both come from the command line or environment and are read once
//! at startup. Configuration values are public; do not store secrets here.

use super::errors::AppError;
use std::path::PathBuf;
use url::Url;

/// Directory name under the platform config dir.
const CONFIG_DIR_NAME: &str = "ats-auth";
/// File name of the persisted session store.
const SESSION_FILE_NAME: &str = "session.json";

/// Client configuration resolved at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// Empty means same-origin: paths are sent as given.
    pub api_base_url: String,
    pub session_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            session_file: default_session_file(),
        }
    }
}

impl AppConfig {
    /// Builds the config, applying overrides that are present and non-blank.
    ///
    /// # Errors
    /// Returns `AppError::Config` if the base URL override is not an absolute URL.
    pub fn load(
        api_base_url: Option<&str>,
        session_file: Option<PathBuf>,
    ) -> Result<Self, AppError> {
        let mut config = Self::default();

        if let Some(value) = api_base_url.and_then(normalize_value) {
            Url::parse(&value)
                .map_err(|err| AppError::Config(format!("invalid API base URL {value}: {err}")))?;
            config.api_base_url = value;
        }

        if let Some(path) = session_file.filter(|path| !path.as_os_str().is_empty()) {
            config.session_file = path;
        }

        Ok(config)
    }
}

/// Default session file under the user's config directory, falling back to
/// the working directory when the platform has none.
#[must_use]
pub fn default_session_file() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_DIR_NAME))
        .unwrap_or_default()
        .join(SESSION_FILE_NAME)
}

fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
