//! The process-wide session slot.
//!
//! The original ambient cookie becomes an explicit, injectable handle so
//! the gateway, the registration flow and the route guard can each be
//! tested in isolation.

use std::sync::{Arc, PoisonError, RwLock};

/// Identity vouched for by a federated provider.
///
/// Not a bearer token: the federated path never produces one, so the guard
/// accepts this as its own session representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSession {
    pub provider: String,
    pub subject: String,
    pub email: Option<String>,
}

/// An authenticated principal, in whichever representation the login path
/// produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    /// Token issued by the registrar or the authenticator.
    Bearer { token: String },
    /// Provider-issued identity from the federated path.
    Federated(ProviderSession),
}

impl Session {
    pub fn bearer(token: impl Into<String>) -> Self {
        Session::Bearer {
            token: token.into(),
        }
    }

    /// The bearer token, when this session carries one.
    pub fn token(&self) -> Option<&str> {
        match self {
            Session::Bearer { token } => Some(token),
            Session::Federated(_) => None,
        }
    }
}

/// Shared slot holding the current session.
///
/// At most one session is active. Writes are last-write-wins: concurrent
/// logins simply race and the most recent to complete stays current, a
/// consciously simple policy for a single-principal client.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    slot: Arc<RwLock<Option<Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current session, if any.
    pub fn current(&self) -> Option<Session> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace whatever session was active.
    pub fn replace(&self, session: Session) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Some(session);
    }

    /// Drop the active session (sign-out).
    pub fn clear(&self) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn is_empty(&self) -> bool {
        self.current().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_and_clear() {
        let store = SessionStore::new();
        assert!(store.is_empty());

        store.replace(Session::bearer("tok-1"));
        assert_eq!(store.current(), Some(Session::bearer("tok-1")));

        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn test_last_write_wins() {
        let store = SessionStore::new();
        store.replace(Session::bearer("tok-1"));
        store.replace(Session::Federated(ProviderSession {
            provider: "acme-id".to_string(),
            subject: "user-9".to_string(),
            email: None,
        }));

        // Only the most recent session survives.
        match store.current() {
            Some(Session::Federated(identity)) => assert_eq!(identity.subject, "user-9"),
            other => panic!("expected the federated session, got {other:?}"),
        }
    }

    #[test]
    fn test_handles_share_one_slot() {
        let store = SessionStore::new();
        let other = store.clone();

        store.replace(Session::bearer("tok-1"));
        assert_eq!(other.current(), Some(Session::bearer("tok-1")));

        other.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn test_token_accessor() {
        assert_eq!(Session::bearer("tok-1").token(), Some("tok-1"));
        let federated = Session::Federated(ProviderSession {
            provider: "acme-id".to_string(),
            subject: "user-9".to_string(),
            email: Some("u@x.com".to_string()),
        });
        assert_eq!(federated.token(), None);
    }
}
