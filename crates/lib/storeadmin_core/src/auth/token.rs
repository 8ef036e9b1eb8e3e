// @awa-component: AUTH-TokenCodec
//
//! Credential token decoding.
//!
//! A token is `header.payload.signature`, each segment base64url encoded.
//! Only the payload is read. No signature or expiry checks happen here.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde_json::Value;
use tracing::debug;

use super::TokenError;
use crate::models::Claims;

/// Scheme prefix some callers store in front of the token.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Standard-alphabet engine that accepts padded and unpadded input.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Strip an optional `Bearer ` prefix.
pub fn strip_bearer(token: &str) -> &str {
    token.strip_prefix(BEARER_PREFIX).unwrap_or(token)
}

/// Decode a token's claims, or `None` if the token is malformed.
///
/// Failures are logged at debug level and never propagated.
pub fn decode(token: &str) -> Option<Claims> {
    match try_decode(token) {
        Ok(claims) => Some(claims),
        Err(e) => {
            debug!(error = %e, "discarding undecodable token");
            None
        }
    }
}

/// Decode a token's claims, reporting why decoding failed.
pub fn try_decode(token: &str) -> Result<Claims, TokenError> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 || segments.iter().any(|s| s.is_empty()) {
        return Err(TokenError::Malformed(segments.len()));
    }

    let standard: String = segments[1]
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();
    let bytes = PAYLOAD_ENGINE.decode(standard)?;

    match serde_json::from_slice::<Value>(&bytes)? {
        Value::Object(map) => Ok(Claims::new(map)),
        _ => Err(TokenError::NotAnObject),
    }
}
