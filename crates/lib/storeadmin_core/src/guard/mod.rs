// @awa-component: NAV-RouteGuard
//
//! Route guards.
//!
//! A guard computes a [`GuardDecision`] from the session and role state; it
//! never navigates by itself. [`GuardDecision::dispatch`] hands redirects to a
//! [`Navigator`], so the decision logic can be tested without one.
//!
//! | Guard         | Condition                 | Decision                      |
//! |---------------|---------------------------|-------------------------------|
//! | `protect`     | session invalid           | replace-redirect to login     |
//! | `public_only` | session valid             | replace-redirect to landing   |
//! | `role_gated`  | checking                  | loading placeholder           |
//! | `role_gated`  | unauthorized              | replace-redirect to forbidden |
//!
//! Every other case renders the wrapped destination.

pub mod navigation;

use crate::auth::authorization::{AuthorizationResolver, AuthorizationState, RoleCheck};
use crate::auth::clock::{Clock, SystemClock};
use crate::auth::session::SessionEvaluator;
use crate::config::{ConsoleConfig, GuardRoutes};
use crate::storage::KeyValueStore;

pub use navigation::{NavigateOptions, Navigator, RecordingNavigator};

/// A navigation that replaces (or pushes onto) the history stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub path: String,
    pub replace: bool,
}

impl Redirect {
    /// A redirect that replaces the current history entry.
    pub fn replace(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            replace: true,
        }
    }
}

/// What a guarded view should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Render the wrapped destination.
    Render,
    /// Render a neutral loading placeholder.
    Loading,
    /// Render nothing and navigate away.
    Redirect(Redirect),
}

impl GuardDecision {
    /// Apply the decision's navigation side effect, if any.
    ///
    /// Returns `true` when the wrapped destination should be rendered.
    pub fn dispatch<N: Navigator + ?Sized>(&self, navigator: &N) -> bool {
        match self {
            Self::Render => true,
            Self::Loading => false,
            Self::Redirect(redirect) => {
                navigator.navigate_to(
                    &redirect.path,
                    NavigateOptions {
                        replace: redirect.replace,
                    },
                );
                false
            }
        }
    }

    pub fn redirect(&self) -> Option<&Redirect> {
        match self {
            Self::Redirect(redirect) => Some(redirect),
            _ => None,
        }
    }
}

/// Protect-if-unauthenticated.
pub fn protect(session_valid: bool, routes: &GuardRoutes) -> GuardDecision {
    if session_valid {
        GuardDecision::Render
    } else {
        GuardDecision::Redirect(Redirect::replace(&routes.login))
    }
}

/// Redirect-if-authenticated, for public pages such as the login screen.
pub fn public_only(session_valid: bool, routes: &GuardRoutes) -> GuardDecision {
    if session_valid {
        GuardDecision::Redirect(Redirect::replace(&routes.landing))
    } else {
        GuardDecision::Render
    }
}

/// Role-gated wrapper.
pub fn role_gated(state: AuthorizationState, routes: &GuardRoutes) -> GuardDecision {
    match state {
        AuthorizationState::Checking => GuardDecision::Loading,
        AuthorizationState::Authorized => GuardDecision::Render,
        AuthorizationState::Unauthorized => {
            GuardDecision::Redirect(Redirect::replace(&routes.access_denied))
        }
    }
}

/// Guards bound to one store and one set of destinations.
#[derive(Debug, Clone)]
pub struct RouteGuard<S, C = SystemClock> {
    session: SessionEvaluator<S, C>,
    resolver: AuthorizationResolver<S>,
    routes: GuardRoutes,
}

impl<S: KeyValueStore + Clone> RouteGuard<S> {
    pub fn new(store: S, config: &ConsoleConfig) -> Self {
        Self {
            session: SessionEvaluator::new(store.clone(), config.storage.clone()),
            resolver: AuthorizationResolver::new(store, config.storage.clone()),
            routes: config.routes.clone(),
        }
    }
}

impl<S: KeyValueStore, C: Clock> RouteGuard<S, C> {
    /// Replace the clock used for expiry checks.
    pub fn with_clock<C2: Clock>(self, clock: C2) -> RouteGuard<S, C2> {
        RouteGuard {
            session: self.session.with_clock(clock),
            resolver: self.resolver,
            routes: self.routes,
        }
    }

    pub fn session(&self) -> &SessionEvaluator<S, C> {
        &self.session
    }

    pub fn resolver(&self) -> &AuthorizationResolver<S> {
        &self.resolver
    }

    pub fn routes(&self) -> &GuardRoutes {
        &self.routes
    }

    /// Decision for a page that requires a session.
    pub fn protect(&self) -> GuardDecision {
        protect(self.session.is_valid_session(), &self.routes)
    }

    /// Decision for a page only anonymous users should see.
    pub fn public_only(&self) -> GuardDecision {
        public_only(self.session.is_valid_session(), &self.routes)
    }

    /// Start a role check for a freshly mounted role-gated page.
    ///
    /// The returned check is still [`AuthorizationState::Checking`];
    /// [`RouteGuard::decide_role_gate`] on it yields [`GuardDecision::Loading`].
    pub fn mount_role_gate<I, R>(&self, required: I) -> RoleCheck
    where
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        RoleCheck::new(required)
    }

    /// Decision for the current state of `check`, without evaluating it.
    pub fn decide_role_gate(&self, check: &RoleCheck) -> GuardDecision {
        role_gated(check.state(), &self.routes)
    }

    /// Evaluate `check` against the store and return the settled decision.
    pub fn role_gated(&self, check: &mut RoleCheck) -> GuardDecision {
        role_gated(check.evaluate(&self.resolver), &self.routes)
    }
}
