// @awa-component: AUTH-AuthorizationResolver
//
//! Role-based access decisions.
//!
//! A user is authorized for a destination when any of its required roles is
//! held, either bare (`ADMIN`) or with the `ROLE_` prefix (`ROLE_ADMIN`).
//! An empty required-role list never authorizes.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use super::token;
use crate::config::StorageKeys;
use crate::storage::KeyValueStore;

/// Prefix the backend may put in front of role names.
pub const ROLE_PREFIX: &str = "ROLE_";

/// State of a role check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorizationState {
    /// The stored token has not been evaluated yet.
    #[default]
    Checking,
    Authorized,
    Unauthorized,
}

impl AuthorizationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Checking => "checking",
            Self::Authorized => "authorized",
            Self::Unauthorized => "unauthorized",
        }
    }

    /// Whether evaluation has finished.
    pub fn is_settled(&self) -> bool {
        !matches!(self, Self::Checking)
    }
}

impl fmt::Display for AuthorizationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a user role satisfies a (bare) required role.
pub fn role_satisfies(user_role: &str, required: &str) -> bool {
    user_role == required
        || user_role
            .strip_prefix(ROLE_PREFIX)
            .is_some_and(|bare| bare == required)
}

/// Whether any required role is satisfied by any user role.
pub fn any_role_matches<U, R>(user_roles: &[U], required: &[R]) -> bool
where
    U: AsRef<str>,
    R: AsRef<str>,
{
    required.iter().any(|r| {
        user_roles
            .iter()
            .any(|u| role_satisfies(u.as_ref(), r.as_ref()))
    })
}

/// Resolves role requirements against the stored token.
#[derive(Debug, Clone)]
pub struct AuthorizationResolver<S> {
    store: S,
    keys: StorageKeys,
}

impl<S: KeyValueStore> AuthorizationResolver<S> {
    pub fn new(store: S, keys: StorageKeys) -> Self {
        Self { store, keys }
    }

    /// Roles carried by the stored token.
    ///
    /// `None` when no token is stored; an empty list when the token does not
    /// decode or carries no roles.
    pub fn user_roles(&self) -> Option<Vec<String>> {
        let stored = self.store.get(&self.keys.access_token)?;
        let roles = token::decode(token::strip_bearer(&stored))
            .map(|claims| claims.roles())
            .unwrap_or_default();
        Some(roles)
    }

    /// Decide access for `required` roles. Always returns a settled state.
    pub fn resolve<R: AsRef<str>>(&self, required: &[R]) -> AuthorizationState {
        let Some(user_roles) = self.user_roles() else {
            debug!("no stored token, access denied");
            return AuthorizationState::Unauthorized;
        };
        if any_role_matches(&user_roles, required) {
            AuthorizationState::Authorized
        } else {
            debug!(roles = ?user_roles, "required role not held");
            AuthorizationState::Unauthorized
        }
    }
}

/// A role check as seen by a mounted view.
///
/// Starts in [`AuthorizationState::Checking`] and settles on the first
/// [`RoleCheck::evaluate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleCheck {
    required: Vec<String>,
    state: AuthorizationState,
}

impl RoleCheck {
    pub fn new<I, R>(required: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        Self {
            required: required.into_iter().map(Into::into).collect(),
            state: AuthorizationState::Checking,
        }
    }

    pub fn required(&self) -> &[String] {
        &self.required
    }

    pub fn state(&self) -> AuthorizationState {
        self.state
    }

    /// Evaluate against the store and record the settled state.
    pub fn evaluate<S: KeyValueStore>(
        &mut self,
        resolver: &AuthorizationResolver<S>,
    ) -> AuthorizationState {
        self.state = resolver.resolve(&self.required);
        self.state
    }
}
