//! Session lifecycle: login, logout and clear-on-expiry.
//!
//! These are the only operations that write to the store.

use tracing::{debug, info};

use super::clock::Clock;
use super::session::{LOGGED_IN_MARKER, SessionEvaluator};
use crate::storage::{KeyValueStore, StorageError};

impl<S: KeyValueStore, C: Clock> SessionEvaluator<S, C> {
    /// Record a fresh login.
    ///
    /// The token is stored as given (bare or `Bearer `-prefixed). `user_info`
    /// is stored verbatim when supplied and removed otherwise, so a previous
    /// user's profile never outlives their session.
    pub fn establish(&self, token: &str, user_info: Option<&str>) -> Result<(), StorageError> {
        let keys = self.keys();
        self.store().set(&keys.access_token, token)?;
        self.store().set(&keys.logged_in, LOGGED_IN_MARKER)?;
        match user_info {
            Some(info) => self.store().set(&keys.user_info, info)?,
            None => self.store().remove(&keys.user_info)?,
        }
        debug!("session established");
        Ok(())
    }

    /// Remove every session key.
    pub fn clear(&self) -> Result<(), StorageError> {
        let keys = self.keys();
        self.store().remove(&keys.access_token)?;
        self.store().remove(&keys.logged_in)?;
        self.store().remove(&keys.user_info)?;
        debug!("session cleared");
        Ok(())
    }

    /// Clear the session if the stored token has expired.
    ///
    /// Returns `true` when the session was cleared. Nothing is touched when no
    /// token is stored or the token is still live.
    pub fn clear_if_expired(&self) -> Result<bool, StorageError> {
        let Some(token) = self.stored_token() else {
            return Ok(false);
        };
        if !self.is_expired(Some(&token)) {
            return Ok(false);
        }
        self.clear()?;
        info!("cleared expired session");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use base64::Engine;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use chrono::{TimeZone, Utc};
    use serde_json::{Value, json};

    use crate::auth::clock::FixedClock;
    use crate::auth::session::SessionEvaluator;
    use crate::config::StorageKeys;
    use crate::storage::{KeyValueStore, MemoryStore};

    const NOW: i64 = 1_750_000_000;

    fn token_for(payload: Value) -> String {
        format!("hdr.{}.sig", URL_SAFE_NO_PAD.encode(payload.to_string()))
    }

    fn evaluator(store: &MemoryStore) -> SessionEvaluator<&MemoryStore, FixedClock> {
        SessionEvaluator::new(store, StorageKeys::default())
            .with_clock(FixedClock(Utc.timestamp_opt(NOW, 0).unwrap()))
    }

    #[test]
    fn establish_writes_token_marker_and_profile() {
        let store = MemoryStore::new();
        let token = token_for(json!({ "exp": NOW + 60 }));

        evaluator(&store)
            .establish(&token, Some(r#"{"name":"Alice"}"#))
            .unwrap();

        assert_eq!(store.get("accessToken"), Some(token));
        assert_eq!(store.get("isLoggedIn").as_deref(), Some("true"));
        assert_eq!(store.get("userInfo").as_deref(), Some(r#"{"name":"Alice"}"#));
        assert!(evaluator(&store).is_valid_session());
    }

    #[test]
    fn establish_without_profile_drops_stale_profile() {
        let store = MemoryStore::with_entries([("userInfo", "previous user")]);
        evaluator(&store).establish("a.b.c", None).unwrap();
        assert_eq!(store.get("userInfo"), None);
    }

    #[test]
    fn clear_removes_all_session_keys() {
        let store = MemoryStore::with_entries([
            ("accessToken", "a.b.c"),
            ("isLoggedIn", "true"),
            ("userInfo", "{}"),
            ("theme", "dark"),
        ]);
        evaluator(&store).clear().unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("theme").as_deref(), Some("dark"));
    }

    #[test]
    fn clear_if_expired_clears_expired_session() {
        let token = token_for(json!({ "exp": NOW - 1 }));
        let store = MemoryStore::with_entries([
            ("accessToken", token.as_str()),
            ("isLoggedIn", "true"),
            ("userInfo", "{}"),
        ]);
        assert!(evaluator(&store).clear_if_expired().unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn clear_if_expired_clears_undecodable_token() {
        let store = MemoryStore::with_entries([("accessToken", "junk"), ("isLoggedIn", "true")]);
        assert!(evaluator(&store).clear_if_expired().unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn clear_if_expired_keeps_live_session() {
        let token = token_for(json!({ "exp": NOW + 60 }));
        let store = MemoryStore::with_entries([
            ("accessToken", token.as_str()),
            ("isLoggedIn", "true"),
        ]);
        assert!(!evaluator(&store).clear_if_expired().unwrap());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn clear_if_expired_without_token_is_a_no_op() {
        let store = MemoryStore::with_entries([("isLoggedIn", "true")]);
        assert!(!evaluator(&store).clear_if_expired().unwrap());
        assert_eq!(store.len(), 1);
    }
}
