//! # storeadmin_core
//!
//! Client-side session and authorization core for the store admin console.
//!
//! - [`auth::token`] decodes the stored credential token (no signature check)
//! - [`auth::SessionEvaluator`] decides whether the stored session is live
//! - [`auth::AuthorizationResolver`] resolves role requirements
//! - [`guard`] turns both into navigation decisions
//!
//! All state lives in an injected [`storage::KeyValueStore`]. Nothing here is
//! a security boundary: the backend enforces access, these checks only decide
//! what the console shows.

pub mod auth;
pub mod config;
pub mod guard;
pub mod models;
pub mod storage;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
