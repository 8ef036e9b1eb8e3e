// @awa-component: AUTH-SessionEvaluator
//
//! Session validity and token expiry.
//!
//! A session is present only when the store holds both a token and the exact
//! logged-in marker, and the token's `exp` is still in the future. Every
//! check re-reads the store; decoded claims are never cached.

use chrono::{DateTime, Utc};

use super::clock::{Clock, SystemClock};
use super::token;
use crate::config::StorageKeys;
use crate::storage::KeyValueStore;

/// Value of the logged-in key while a session is active.
pub const LOGGED_IN_MARKER: &str = "true";

/// Evaluates the stored session against the current time.
#[derive(Debug, Clone)]
pub struct SessionEvaluator<S, C = SystemClock> {
    store: S,
    keys: StorageKeys,
    clock: C,
}

impl<S: KeyValueStore> SessionEvaluator<S> {
    /// Evaluator over `store` using the system clock.
    pub fn new(store: S, keys: StorageKeys) -> Self {
        Self {
            store,
            keys,
            clock: SystemClock,
        }
    }
}

impl<S: KeyValueStore, C: Clock> SessionEvaluator<S, C> {
    /// Replace the clock used for expiry checks.
    pub fn with_clock<C2: Clock>(self, clock: C2) -> SessionEvaluator<S, C2> {
        SessionEvaluator {
            store: self.store,
            keys: self.keys,
            clock,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// The stored token, exactly as stored.
    pub fn stored_token(&self) -> Option<String> {
        self.store.get(&self.keys.access_token)
    }

    /// Whether `token` is expired.
    ///
    /// A missing token, an undecodable token, and a token without `exp` are
    /// all treated as expired.
    pub fn is_expired(&self, token: Option<&str>) -> bool {
        is_expired_at(token, self.clock.now())
    }

    /// Absolute expiry of `token`, if it decodes and carries `exp`.
    pub fn expiration_instant(&self, token: Option<&str>) -> Option<DateTime<Utc>> {
        expiration_instant(token)
    }

    /// Whether the store holds a live session.
    pub fn is_valid_session(&self) -> bool {
        let Some(token) = self.stored_token() else {
            return false;
        };
        if self.store.get(&self.keys.logged_in).as_deref() != Some(LOGGED_IN_MARKER) {
            return false;
        }
        !self.is_expired(Some(&token))
    }
}

/// Whether `token` (optionally `Bearer `-prefixed) is expired at `now`.
pub fn is_expired_at(token: Option<&str>, now: DateTime<Utc>) -> bool {
    expiration_instant(token).is_none_or(|expires_at| expires_at < now)
}

/// Absolute expiry of `token` (optionally `Bearer `-prefixed).
pub fn expiration_instant(token: Option<&str>) -> Option<DateTime<Utc>> {
    let claims = token::decode(token::strip_bearer(token?))?;
    DateTime::from_timestamp_millis(claims.expires_at_millis()?)
}

#[cfg(test)]
mod tests {
    use base64::Engine;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use chrono::TimeZone;
    use serde_json::{Value, json};

    use super::*;
    use crate::auth::clock::FixedClock;
    use crate::storage::MemoryStore;

    const NOW: i64 = 1_750_000_000;

    fn token_for(payload: Value) -> String {
        format!("hdr.{}.sig", URL_SAFE_NO_PAD.encode(payload.to_string()))
    }

    fn clock() -> FixedClock {
        FixedClock(Utc.timestamp_opt(NOW, 0).unwrap())
    }

    fn evaluator(store: &MemoryStore) -> SessionEvaluator<&MemoryStore, FixedClock> {
        SessionEvaluator::new(store, StorageKeys::default()).with_clock(clock())
    }

    #[test]
    fn token_expired_one_second_ago_is_expired() {
        let store = MemoryStore::new();
        let token = token_for(json!({ "exp": NOW - 1 }));
        assert!(evaluator(&store).is_expired(Some(&token)));
    }

    #[test]
    fn token_expiring_in_an_hour_is_not_expired() {
        let store = MemoryStore::new();
        let token = token_for(json!({ "exp": NOW + 3600 }));
        assert!(!evaluator(&store).is_expired(Some(&token)));
    }

    #[test]
    fn token_expiring_now_is_not_yet_expired() {
        let store = MemoryStore::new();
        let token = token_for(json!({ "exp": NOW }));
        assert!(!evaluator(&store).is_expired(Some(&token)));
    }

    #[test]
    fn missing_exp_or_token_counts_as_expired() {
        let store = MemoryStore::new();
        let eval = evaluator(&store);
        assert!(eval.is_expired(Some(&token_for(json!({ "sub": "alice" })))));
        assert!(eval.is_expired(None));
        assert!(eval.is_expired(Some("garbage")));
    }

    #[test]
    fn bearer_prefix_is_accepted() {
        let store = MemoryStore::new();
        let token = format!("Bearer {}", token_for(json!({ "exp": NOW + 60 })));
        let eval = evaluator(&store);
        assert!(!eval.is_expired(Some(&token)));
        assert_eq!(
            eval.expiration_instant(Some(&token)),
            Some(Utc.timestamp_opt(NOW + 60, 0).unwrap())
        );
    }

    #[test]
    fn expiration_instant_is_none_without_exp() {
        assert_eq!(expiration_instant(None), None);
        assert_eq!(expiration_instant(Some("a.b")), None);
        assert_eq!(
            expiration_instant(Some(&token_for(json!({ "sub": "alice" })))),
            None
        );
    }

    #[test]
    fn expiration_instant_has_millisecond_resolution() {
        let token = token_for(json!({ "exp": 1_000 }));
        let instant = expiration_instant(Some(&token)).unwrap();
        assert_eq!(instant.timestamp_millis(), 1_000_000);
    }

    #[test]
    fn valid_session_requires_token_marker_and_future_exp() {
        let token = token_for(json!({ "exp": NOW + 3600 }));
        let store = MemoryStore::with_entries([
            ("accessToken", token.as_str()),
            ("isLoggedIn", "true"),
        ]);
        assert!(evaluator(&store).is_valid_session());
    }

    #[test]
    fn session_without_token_is_invalid() {
        let store = MemoryStore::with_entries([("isLoggedIn", "true")]);
        assert!(!evaluator(&store).is_valid_session());
    }

    #[test]
    fn logged_in_marker_must_be_exactly_true() {
        let token = token_for(json!({ "exp": NOW + 3600 }));
        for marker in ["1", "TRUE", "True", " true", "yes"] {
            let store = MemoryStore::with_entries([
                ("accessToken", token.as_str()),
                ("isLoggedIn", marker),
            ]);
            assert!(
                !evaluator(&store).is_valid_session(),
                "marker {marker:?} should not count"
            );
        }
    }

    #[test]
    fn missing_marker_is_invalid() {
        let token = token_for(json!({ "exp": NOW + 3600 }));
        let store = MemoryStore::with_entries([("accessToken", token.as_str())]);
        assert!(!evaluator(&store).is_valid_session());
    }

    #[test]
    fn expired_stored_token_is_invalid() {
        let token = token_for(json!({ "exp": NOW - 10 }));
        let store = MemoryStore::with_entries([
            ("accessToken", token.as_str()),
            ("isLoggedIn", "true"),
        ]);
        assert!(!evaluator(&store).is_valid_session());
    }

    #[test]
    fn custom_storage_keys_are_honoured() {
        let token = token_for(json!({ "exp": NOW + 3600 }));
        let keys = StorageKeys {
            access_token: "jwt".into(),
            logged_in: "active".into(),
            user_info: "profile".into(),
        };
        let store = MemoryStore::with_entries([("jwt", token.as_str()), ("active", "true")]);
        let eval = SessionEvaluator::new(&store, keys).with_clock(clock());
        assert!(eval.is_valid_session());
    }

    #[test]
    fn every_check_rereads_the_store() {
        let token = token_for(json!({ "exp": NOW + 3600 }));
        let store = MemoryStore::with_entries([
            ("accessToken", token.as_str()),
            ("isLoggedIn", "true"),
        ]);
        let eval = evaluator(&store);
        assert!(eval.is_valid_session());

        store.set("isLoggedIn", "false").unwrap();
        assert!(!eval.is_valid_session());
    }
}
