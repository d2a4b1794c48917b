//! Interchangeable login strategies.
//!
//! Three functionally equivalent ways to prove an identity, modeled as a
//! tagged variant behind one `attempt` entry point. Every path funnels into
//! the same session-store write, so the rest of the system is indifferent
//! to which one was used.

use std::sync::Arc;

use tracing::{info, warn};

use crate::backend::{AuthBackend, FederatedProvider};
use crate::error::AuthError;
use crate::models::DemoAccount;
use crate::session::{Session, SessionStore};

/// One way to prove an identity.
#[derive(Clone)]
pub enum LoginStrategy {
    /// User-supplied identifier and secret.
    Direct { identifier: String, secret: String },
    /// A catalog identity; the same exchange as `Direct` with a known-good
    /// pair.
    Demo { account: DemoAccount },
    /// Delegate proof to the configured federated provider.
    Federated,
}

/// What a successful attempt produced. The gateway has already folded the
/// session into the store; callers only route on it.
#[derive(Debug, Clone)]
pub struct IdentityStrategyResult {
    pub session: Session,
    pub is_new_user: bool,
}

/// Normalizes every login path to a stored session plus a first-time flag.
pub struct IdentityGateway {
    backend: Arc<dyn AuthBackend>,
    provider: Option<Arc<dyn FederatedProvider>>,
    sessions: SessionStore,
}

impl IdentityGateway {
    pub fn new(backend: Arc<dyn AuthBackend>, sessions: SessionStore) -> Self {
        Self {
            backend,
            provider: None,
            sessions,
        }
    }

    /// Configure a federated provider for the `Federated` strategy.
    pub fn with_provider(mut self, provider: Arc<dyn FederatedProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Run one login attempt. On success the resulting session has already
    /// replaced whatever was in the store.
    pub async fn attempt(&self, strategy: LoginStrategy) -> Result<IdentityStrategyResult, AuthError> {
        match strategy {
            LoginStrategy::Direct { identifier, secret } => {
                self.exchange(&identifier, &secret).await
            }
            LoginStrategy::Demo { account } => {
                info!(account = account.label, "demo quick-login");
                self.exchange(account.email, account.password).await
            }
            LoginStrategy::Federated => {
                let provider = self.provider.as_ref().ok_or_else(|| AuthError::Rejected {
                    reason: Some("No federated identity provider is configured".to_string()),
                })?;

                let identity = provider.authorize().await?;
                let session = Session::Federated(identity);
                self.sessions.replace(session.clone());
                info!("federated identity accepted");

                // Provider identities take the returning-user flow.
                Ok(IdentityStrategyResult {
                    session,
                    is_new_user: false,
                })
            }
        }
    }

    async fn exchange(
        &self,
        identifier: &str,
        secret: &str,
    ) -> Result<IdentityStrategyResult, AuthError> {
        let token = self.backend.authenticate(identifier, secret).await?;
        let session = Session::bearer(token.clone());
        self.sessions.replace(session.clone());
        info!("credentials accepted; session replaced");

        // The token is live from here on; a failed status lookup must not
        // undo it. The user just lands on the default flow instead.
        let is_new_user = match self.backend.is_new_user(&token).await {
            Ok(flag) => flag,
            Err(err) => {
                warn!(error = %err, "user status lookup failed; using the default flow");
                false
            }
        };

        Ok(IdentityStrategyResult {
            session,
            is_new_user,
        })
    }
}
