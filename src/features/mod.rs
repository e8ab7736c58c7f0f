//! Feature modules. `auth` owns the session lifecycle and the login screen;
//! `users` covers current-user lookup and the admin dashboard.

pub mod auth;
pub mod users;
