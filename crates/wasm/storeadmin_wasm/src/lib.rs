//! WebAssembly bindings for the admin console.
//!
//! The SPA hands `window.localStorage` to [`SessionGuard`] and applies the
//! returned [`GuardOutcome`] with its own router.

use std::rc::Rc;

use storeadmin_core::auth::clock::{Clock, SystemClock};
use storeadmin_core::auth::session::{expiration_instant, is_expired_at};
use storeadmin_core::auth::token;
use storeadmin_core::config::ConsoleConfig;
use storeadmin_core::guard::{GuardDecision, RouteGuard};
use storeadmin_core::storage::{KeyValueStore, StorageError};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// The DOM `Storage` interface.
    #[wasm_bindgen(typescript_type = "Storage")]
    pub type Storage;

    #[wasm_bindgen(method, js_name = getItem)]
    fn get_item(this: &Storage, key: &str) -> Option<String>;

    #[wasm_bindgen(method, catch, js_name = setItem)]
    fn set_item(this: &Storage, key: &str, value: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(method, js_name = removeItem)]
    fn remove_item(this: &Storage, key: &str);
}

/// [`KeyValueStore`] over a DOM `Storage` object.
struct BrowserStore {
    storage: Storage,
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| StorageError::Backend(format!("{e:?}")))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.storage.remove_item(key);
        Ok(())
    }
}

/// Returns the version of the bindings.
#[wasm_bindgen]
pub fn version() -> String {
    storeadmin_core::version().to_string()
}

/// Claims of `token` as a JSON string, or `undefined` if it does not decode.
#[wasm_bindgen(js_name = decodeToken)]
pub fn decode_token(token: &str) -> Option<String> {
    let claims = token::decode(token::strip_bearer(token))?;
    serde_json::to_string(&claims).ok()
}

/// Whether `token` is expired now. Missing or undecodable tokens are expired.
#[wasm_bindgen(js_name = isTokenExpired)]
pub fn is_token_expired(token: Option<String>) -> bool {
    is_expired_at(token.as_deref(), SystemClock.now())
}

/// Expiry of `token` in epoch milliseconds, or `undefined`.
#[wasm_bindgen(js_name = tokenExpirationMs)]
pub fn token_expiration_ms(token: Option<String>) -> Option<f64> {
    expiration_instant(token.as_deref()).map(|t| t.timestamp_millis() as f64)
}

/// A guard decision in a shape JavaScript can consume.
///
/// `kind` is `"render"`, `"loading"` or `"redirect"`; `path` and `replace`
/// are only meaningful for redirects.
#[wasm_bindgen(getter_with_clone)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardOutcome {
    pub kind: String,
    pub path: Option<String>,
    pub replace: bool,
}

impl From<GuardDecision> for GuardOutcome {
    fn from(decision: GuardDecision) -> Self {
        match decision {
            GuardDecision::Render => Self {
                kind: "render".into(),
                path: None,
                replace: false,
            },
            GuardDecision::Loading => Self {
                kind: "loading".into(),
                path: None,
                replace: false,
            },
            GuardDecision::Redirect(redirect) => Self {
                kind: "redirect".into(),
                path: Some(redirect.path),
                replace: redirect.replace,
            },
        }
    }
}

/// Outcome to render while a role-gated page is still checking.
#[wasm_bindgen(js_name = pendingRoleGate)]
pub fn pending_role_gate() -> GuardOutcome {
    GuardDecision::Loading.into()
}

/// Session checks and guards over a browser `Storage`.
#[wasm_bindgen]
pub struct SessionGuard {
    guard: RouteGuard<Rc<BrowserStore>>,
}

#[wasm_bindgen]
impl SessionGuard {
    #[wasm_bindgen(constructor)]
    pub fn new(storage: Storage) -> SessionGuard {
        let store = Rc::new(BrowserStore { storage });
        SessionGuard {
            guard: RouteGuard::new(store, &ConsoleConfig::default()),
        }
    }

    #[wasm_bindgen(js_name = isValidSession)]
    pub fn is_valid_session(&self) -> bool {
        self.guard.session().is_valid_session()
    }

    /// `"authorized"` or `"unauthorized"` for the given required roles.
    pub fn resolve(&self, roles: Vec<String>) -> String {
        self.guard.resolver().resolve(roles.as_slice()).to_string()
    }

    pub fn protect(&self) -> GuardOutcome {
        self.guard.protect().into()
    }

    #[wasm_bindgen(js_name = publicOnly)]
    pub fn public_only(&self) -> GuardOutcome {
        self.guard.public_only().into()
    }

    #[wasm_bindgen(js_name = roleGated)]
    pub fn role_gated(&self, roles: Vec<String>) -> GuardOutcome {
        let mut check = self.guard.mount_role_gate(roles);
        self.guard.role_gated(&mut check).into()
    }

    pub fn login(&self, token: &str, user_info: Option<String>) -> Result<(), JsError> {
        self.guard
            .session()
            .establish(token, user_info.as_deref())
            .map_err(|e| JsError::new(&e.to_string()))
    }

    pub fn logout(&self) -> Result<(), JsError> {
        self.guard
            .session()
            .clear()
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Clear the stored session if it has expired; returns whether it did.
    #[wasm_bindgen(js_name = clearIfExpired)]
    pub fn clear_if_expired(&self) -> Result<bool, JsError> {
        self.guard
            .session()
            .clear_if_expired()
            .map_err(|e| JsError::new(&e.to_string()))
    }
}
