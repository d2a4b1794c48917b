//! Admission control for protected views.

use crate::session::{Session, SessionStore};

/// Navigation targets the auth core cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Credential-entry entry point.
    Login,
    /// Default landing area.
    Dashboard,
    /// First-run flow for brand-new identities.
    Onboarding,
}

/// Outcome of an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Granted,
    Redirect(Route),
}

/// Gate in front of every protected view.
///
/// Consults the session store synchronously; a present session with a
/// usable representation is the sole admission criterion. No role or scope
/// distinction happens at this layer.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    sessions: SessionStore,
}

impl RouteGuard {
    pub fn new(sessions: SessionStore) -> Self {
        Self { sessions }
    }

    /// True when a session with a non-empty bearer token or a federated
    /// identity is active. Also answers the inverse question: a signed-in
    /// visitor skips the credential-entry screens.
    pub fn is_admitted(&self) -> bool {
        match self.sessions.current() {
            Some(Session::Bearer { token }) => !token.is_empty(),
            Some(Session::Federated(_)) => true,
            None => false,
        }
    }

    /// Admit the navigation or send the visitor to the login screen. The
    /// originally requested destination is not preserved.
    pub fn admit(&self) -> Admission {
        if self.is_admitted() {
            Admission::Granted
        } else {
            Admission::Redirect(Route::Login)
        }
    }
}
