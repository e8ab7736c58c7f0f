//! Shared client utilities for API access, configuration, errors, and build metadata.
//!
//! Every feature client goes through [`api::ApiClient`] so request setup and error
//! extraction stay uniform. These utilities only attach headers provided by
//! callers; they never persist or log token material.

pub mod api;
#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}
pub mod config;
pub mod errors;

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

pub use api::ApiClient;
pub use config::AppConfig;
pub use errors::AppError;
