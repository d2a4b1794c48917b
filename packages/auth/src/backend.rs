//! Contracts with the remote collaborators.
//!
//! The core never speaks HTTP directly; it goes through these seams. The
//! concrete implementation wraps [`api_client::ApiClient`]; test suites
//! substitute hand-rolled fakes.

use async_trait::async_trait;

use crate::error::AuthError;
use crate::session::ProviderSession;

/// Registrar acknowledgement: the account is held pending until the
/// passcode is confirmed.
#[derive(Debug, Clone)]
pub struct RegistrationReceipt {
    pub otp: String,
    pub pending: bool,
}

/// The remote auth service: registrar, OTP verifier, authenticator and
/// user-status lookup.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Submit a registration. A success carries the passcode material.
    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<RegistrationReceipt, AuthError>;

    /// Confirm the passcode for an email. A success carries the issued
    /// long-lived token.
    async fn verify(&self, email: &str, code: &str) -> Result<String, AuthError>;

    /// Exchange an identifier and secret for a token. Used by both the
    /// direct and the demo login paths.
    async fn authenticate(&self, identifier: &str, secret: &str) -> Result<String, AuthError>;

    /// Whether the identity behind the token is seeing the product for the
    /// first time. Authorized by the token itself.
    async fn is_new_user(&self, token: &str) -> Result<bool, AuthError>;
}

/// Third-party identity provider. The federation protocol is its problem;
/// the core only consumes the vouched identity.
#[async_trait]
pub trait FederatedProvider: Send + Sync {
    async fn authorize(&self) -> Result<ProviderSession, AuthError>;
}

#[async_trait]
impl AuthBackend for api_client::ApiClient {
    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<RegistrationReceipt, AuthError> {
        let response = self.signup(name, email, password).await?;
        Ok(RegistrationReceipt {
            otp: response.otp,
            pending: response.pending,
        })
    }

    async fn verify(&self, email: &str, code: &str) -> Result<String, AuthError> {
        let response = self.verify_otp(email, code).await?;
        Ok(response.access_token)
    }

    async fn authenticate(&self, identifier: &str, secret: &str) -> Result<String, AuthError> {
        let response = self.login(identifier, secret).await?;
        Ok(response.access_token)
    }

    async fn is_new_user(&self, token: &str) -> Result<bool, AuthError> {
        // Any failure here is a status-lookup failure, not an auth failure:
        // the token is already live and must stay usable.
        api_client::ApiClient::is_new_user(self, token)
            .await
            .map_err(|err| AuthError::StatusLookup(err.to_string()))
    }
}
