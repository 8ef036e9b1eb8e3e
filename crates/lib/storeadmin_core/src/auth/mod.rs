//! Session and authorization logic.
//!
//! Decodes the stored credential token, evaluates session validity and
//! expiry, and resolves role-based access. Signatures are never verified
//! here: the results drive navigation only, the backend remains the
//! enforcement point.

pub mod authorization;
pub mod clock;
pub mod lifecycle;
pub mod session;
pub mod token;

use thiserror::Error;

pub use authorization::{AuthorizationResolver, AuthorizationState, RoleCheck};
pub use clock::{Clock, FixedClock, SystemClock};
pub use session::SessionEvaluator;

/// Token decoding errors.
///
/// These never cross the public decode boundary: [`token::decode`] logs them
/// and returns `None`.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Malformed token: expected 3 non-empty segments, found {0}")]
    Malformed(usize),

    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Payload is not a JSON object")]
    NotAnObject,
}
