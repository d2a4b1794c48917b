//! Shared fakes for the integration tests.
//!
//! The fakes count every call so tests can assert the observable contract:
//! how many times each collaborator was reached, not just the end state.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use auth_core::backend::{AuthBackend, FederatedProvider, RegistrationReceipt};
use auth_core::error::AuthError;
use auth_core::session::ProviderSession;

/// How a fake endpoint should respond.
#[derive(Clone, Copy)]
pub enum Respond {
    Accept,
    Reject(Option<&'static str>),
    Unreachable,
}

fn apply(respond: Respond) -> Result<(), AuthError> {
    match respond {
        Respond::Accept => Ok(()),
        Respond::Reject(reason) => Err(AuthError::Rejected {
            reason: reason.map(str::to_string),
        }),
        Respond::Unreachable => Err(AuthError::Unreachable("connection refused".to_string())),
    }
}

pub struct FakeBackend {
    pub otp: &'static str,
    pub token: &'static str,
    pub is_new_user: bool,
    pub on_register: Respond,
    pub on_authenticate: Respond,
    /// The first `.1` verify calls respond with `.0` before accepting.
    pub verify_hiccups: (Respond, usize),
    pub status_fails: bool,
    pub registrar_calls: AtomicUsize,
    pub verify_calls: AtomicUsize,
    pub authenticate_calls: AtomicUsize,
    pub status_calls: AtomicUsize,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            otp: "482913",
            token: "tok-1",
            is_new_user: false,
            on_register: Respond::Accept,
            on_authenticate: Respond::Accept,
            verify_hiccups: (Respond::Accept, 0),
            status_fails: false,
            registrar_calls: AtomicUsize::new(0),
            verify_calls: AtomicUsize::new(0),
            authenticate_calls: AtomicUsize::new(0),
            status_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl AuthBackend for FakeBackend {
    async fn register(
        &self,
        _name: &str,
        _email: &str,
        _password: &str,
    ) -> Result<RegistrationReceipt, AuthError> {
        self.registrar_calls.fetch_add(1, Ordering::SeqCst);
        apply(self.on_register)?;
        Ok(RegistrationReceipt {
            otp: self.otp.to_string(),
            pending: true,
        })
    }

    async fn verify(&self, _email: &str, _code: &str) -> Result<String, AuthError> {
        let call = self.verify_calls.fetch_add(1, Ordering::SeqCst);
        let (respond, hiccups) = self.verify_hiccups;
        if call < hiccups {
            apply(respond)?;
        }
        Ok(self.token.to_string())
    }

    async fn authenticate(&self, identifier: &str, _secret: &str) -> Result<String, AuthError> {
        self.authenticate_calls.fetch_add(1, Ordering::SeqCst);
        apply(self.on_authenticate)?;
        Ok(format!("token-for-{identifier}"))
    }

    async fn is_new_user(&self, _token: &str) -> Result<bool, AuthError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        if self.status_fails {
            return Err(AuthError::StatusLookup(
                "status endpoint returned 503".to_string(),
            ));
        }
        Ok(self.is_new_user)
    }
}

/// A provider that vouches for a fixed identity.
pub struct FakeProvider;

#[async_trait]
impl FederatedProvider for FakeProvider {
    async fn authorize(&self) -> Result<ProviderSession, AuthError> {
        Ok(ProviderSession {
            provider: "acme-id".to_string(),
            subject: "user-9".to_string(),
            email: Some("user-9@example.com".to_string()),
        })
    }
}
