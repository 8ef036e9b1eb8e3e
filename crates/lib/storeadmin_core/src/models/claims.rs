//! Token claims model.
//!
//! Claims are kept as the raw JSON object decoded from the token payload.
//! The accessors below read the fields the console recognizes; everything
//! else is preserved untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Claim names shared with the issuing backend.
pub mod names {
    pub const SUBJECT: &str = "sub";
    pub const ISSUER: &str = "iss";
    pub const ISSUED_AT: &str = "iat";
    pub const EXPIRES_AT: &str = "exp";
    pub const AUTHORITIES: &str = "authorities";
    pub const ROLES: &str = "roles";
    pub const ROLE: &str = "role";
}

/// Claims decoded from a credential token payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims(Map<String, Value>);

impl Claims {
    pub fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Raw claim lookup.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Subject (`sub`).
    pub fn subject(&self) -> Option<&str> {
        self.get(names::SUBJECT).and_then(Value::as_str)
    }

    /// Issuer (`iss`).
    pub fn issuer(&self) -> Option<&str> {
        self.get(names::ISSUER).and_then(Value::as_str)
    }

    /// Issued-at (`iat`) in milliseconds since the epoch.
    pub fn issued_at_millis(&self) -> Option<i64> {
        self.get(names::ISSUED_AT).and_then(seconds_to_millis)
    }

    /// Expiry (`exp`) in milliseconds since the epoch.
    pub fn expires_at_millis(&self) -> Option<i64> {
        self.get(names::EXPIRES_AT).and_then(seconds_to_millis)
    }

    /// Role names carried by the token.
    ///
    /// Sources are tried in order and the first one present wins; sources are
    /// never merged:
    ///
    /// 1. `authorities` as an array
    /// 2. `roles` as an array
    /// 3. `authorities` as a string
    /// 4. `roles` as a string
    /// 5. `role` as a string
    ///
    /// Non-string array elements are skipped.
    pub fn roles(&self) -> Vec<String> {
        for name in [names::AUTHORITIES, names::ROLES] {
            if let Some(Value::Array(items)) = self.get(name) {
                return items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_owned)
                    .collect();
            }
        }
        for name in [names::AUTHORITIES, names::ROLES, names::ROLE] {
            if let Some(Value::String(role)) = self.get(name) {
                return vec![role.clone()];
            }
        }
        Vec::new()
    }
}

impl From<Map<String, Value>> for Claims {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Numeric date (seconds, possibly fractional) to whole milliseconds.
fn seconds_to_millis(value: &Value) -> Option<i64> {
    if let Some(secs) = value.as_i64() {
        return secs.checked_mul(1000);
    }
    let millis = value.as_f64()? * 1000.0;
    if millis.is_finite() && millis.abs() < i64::MAX as f64 {
        Some(millis.round() as i64)
    } else {
        None
    }
}
