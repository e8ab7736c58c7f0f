use crate::{
    app::App,
    app_lib::{ApiClient, AppConfig},
    components::TerminalNotifier,
    features::auth::storage::FileStore,
};
use anyhow::Result;
use std::sync::Arc;

/// Settings shared by every action.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub config: AppConfig,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Wires the file-backed session store and terminal notices into an [`App`].
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn app(&self) -> Result<App> {
        let api = ApiClient::from_config(&self.config)?;
        let store = Arc::new(FileStore::new(&self.config.session_file));
        Ok(App::new(api, store, Arc::new(TerminalNotifier)))
    }
}
