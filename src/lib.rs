//! # ats-auth
//!
//! Native client for the Resume ATS authentication API. It covers the whole
//! account lifecycle the product exposes before any recruiting work starts:
//!
//! - **Login:** `POST /api/auth/login` returns a bearer token and the user record.
//! - **Bootstrap:** `POST /api/auth/bootstrap-admin` creates the first admin once.
//! - **Current user:** `GET /api/users/me` re-validates a stored token.
//! - **Recruiters:** `POST /api/users/recruiters` lets an admin create recruiter accounts.
//!
//! ## Session lifecycle
//!
//! The token and user record are mirrored into a small key-value store so a
//! session survives restarts. On every start the stored token is re-validated
//! against `/api/users/me` ("hydration"); any failure wipes the stored session
//! silently and the client starts anonymous.
//!
//! Tokens and passwords are carried as `SecretString` and must never be logged.

pub mod app;
pub mod app_lib;
pub mod cli;
pub mod components;
pub mod features;

pub use app_lib::{APP_USER_AGENT, GIT_COMMIT_HASH};
