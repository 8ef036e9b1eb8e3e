use std::path::{Path, PathBuf};

use serde_json::json;
use storeadmin_core::auth::{SessionEvaluator, token};
use storeadmin_core::config::ConsoleConfig;
use storeadmin_core::guard::{GuardDecision, NavigateOptions, Navigator, RouteGuard};
use storeadmin_core::storage::FileStore;

use crate::cli::GuardKind;
use crate::{Error, Result};

/// Default session store: `<data dir>/storeadmin/session.json`.
pub fn default_store_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("storeadmin")
        .join("session.json")
}

/// Load the config file (if any), then apply environment overrides.
pub fn load_config(path: Option<&Path>) -> Result<ConsoleConfig> {
    let config = match path {
        Some(path) => ConsoleConfig::load(path)?,
        None => ConsoleConfig::default(),
    };
    Ok(config.with_env_overrides()?)
}

/// Prints navigations instead of performing them.
struct StdoutNavigator;

impl Navigator for StdoutNavigator {
    fn navigate_to(&self, path: &str, options: NavigateOptions) {
        let mode = if options.replace { "replace" } else { "push" };
        println!("navigate {path} ({mode})");
    }
}

pub struct Context {
    store: FileStore,
    config: ConsoleConfig,
}

impl Context {
    pub fn new(store: FileStore, config: ConsoleConfig) -> Self {
        Self { store, config }
    }

    fn session(&self) -> SessionEvaluator<&FileStore> {
        SessionEvaluator::new(&self.store, self.config.storage.clone())
    }

    fn guard(&self) -> RouteGuard<&FileStore> {
        RouteGuard::new(&self.store, &self.config)
    }

    pub fn decode(&self, raw: &str) -> Result<()> {
        let claims = token::try_decode(token::strip_bearer(raw))
            .map_err(|e| Error::Custom(format!("Cannot decode token: {e}")))?;
        let session = self.session();
        let expires_at = session.expiration_instant(Some(raw));
        let report = json!({
            "claims": &claims,
            "roles": claims.roles(),
            "expires_at": expires_at.map(|t| t.to_rfc3339()),
            "expired": session.is_expired(Some(raw)),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        Ok(())
    }

    pub fn login(&self, raw: &str, user_info: Option<&str>) -> Result<()> {
        if token::decode(token::strip_bearer(raw)).is_none() {
            log::warn!("token does not decode; the session will be treated as expired");
        }
        self.session().establish(raw, user_info)?;
        println!("logged in ({})", self.store.path().display());
        Ok(())
    }

    pub fn logout(&self) -> Result<()> {
        self.session().clear()?;
        println!("logged out");
        Ok(())
    }

    pub fn session_status(&self, clear_expired: bool) -> Result<()> {
        let session = self.session();
        if clear_expired && session.clear_if_expired()? {
            println!("expired session cleared");
        }
        let status = if session.is_valid_session() {
            "valid"
        } else {
            "invalid"
        };
        println!("session: {status}");

        let token = session.stored_token();
        match session.expiration_instant(token.as_deref()) {
            Some(expires_at) => println!("expires: {}", expires_at.to_rfc3339()),
            None => println!("expires: unknown"),
        }
        Ok(())
    }

    pub fn authorize(&self, roles: &[String]) -> Result<()> {
        let state = self.guard().resolver().resolve(roles);
        println!("{state}");
        Ok(())
    }

    pub fn guard_decision(&self, kind: GuardKind, roles: &[String]) -> Result<()> {
        let guard = self.guard();
        let decision = match kind {
            GuardKind::Protected => guard.protect(),
            GuardKind::PublicOnly => guard.public_only(),
            GuardKind::RoleGated => {
                let mut check = guard.mount_role_gate(roles.iter().cloned());
                log::debug!("role gate mounted in state {}", check.state());
                let decision = guard.role_gated(&mut check);
                println!("{}", check.state());
                decision
            }
        };

        match decision {
            GuardDecision::Render => println!("render"),
            GuardDecision::Loading => println!("loading"),
            GuardDecision::Redirect(_) => {}
        }
        decision.dispatch(&StdoutNavigator);
        Ok(())
    }
}
