//! HTTP client for the Marketdesk auth API.
//!
//! Wraps the registrar, OTP verifier, authenticator and user-status
//! endpoints behind typed methods. The client is deliberately thin: it maps
//! HTTP outcomes to [`ApiError`] and decodes bodies, nothing more. Flow
//! decisions belong to the caller.

pub mod error;
pub mod models;

pub use error::ApiError;

use std::collections::HashMap;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::models::{
    ErrorBody, NewUserResponse, SignupRequest, SignupResponse, TokenResponse, VerifyOtpRequest,
};

/// Connection options for the Marketdesk API.
#[derive(Debug, Clone)]
pub struct ApiOptions {
    pub base_url: String,
}

/// Client for the remote auth endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    options: ApiOptions,
    http: Client,
}

impl ApiClient {
    pub fn new(options: ApiOptions) -> Self {
        Self {
            options,
            http: Client::new(),
        }
    }

    /// Register a new account. The acknowledgement carries the one-time
    /// passcode the caller must confirm before a durable identity exists.
    pub async fn signup(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
    ) -> Result<SignupResponse, ApiError> {
        let url = format!("{}/signup", self.options.base_url);
        debug!(%email, "calling registrar");

        let response = self
            .http
            .post(url)
            .json(&SignupRequest {
                full_name: full_name.to_string(),
                email: email.to_string(),
                password: password.to_string(),
            })
            .send()
            .await
            .map_err(ApiError::Transport)?;

        Self::decode(response).await
    }

    /// Confirm the passcode for a pending registration. Success yields the
    /// long-lived token.
    pub async fn verify_otp(&self, email: &str, code: &str) -> Result<TokenResponse, ApiError> {
        let url = format!("{}/verify-otp", self.options.base_url);
        debug!(%email, "confirming passcode");

        let response = self
            .http
            .post(url)
            .json(&VerifyOtpRequest {
                email: email.to_string(),
                code: code.to_string(),
            })
            .send()
            .await
            .map_err(ApiError::Transport)?;

        Self::decode(response).await
    }

    /// Exchange credentials for a token. The endpoint takes the OAuth2
    /// password form fields, so the body is form-encoded.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let url = format!("{}/login", self.options.base_url);
        debug!(%username, "exchanging credentials");

        let mut form: HashMap<&str, &str> = HashMap::new();
        form.insert("username", username);
        form.insert("password", password);

        let response = self
            .http
            .post(url)
            .form(&form)
            .send()
            .await
            .map_err(ApiError::Transport)?;

        Self::decode(response).await
    }

    /// Whether the identity behind the token is seeing the product for the
    /// first time. Authorized by the token itself.
    pub async fn is_new_user(&self, token: &str) -> Result<bool, ApiError> {
        let url = format!("{}/is-new-user", self.options.base_url);

        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(ApiError::Transport)?;

        Self::decode::<NewUserResponse>(response)
            .await
            .map(|body| body.is_new_user)
    }

    /// Decode a success body, or turn a non-success status into a rejection
    /// carrying the service's `detail` message when it sent one.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            response.json::<T>().await.map_err(ApiError::Decode)
        } else {
            let detail = response
                .json::<ErrorBody>()
                .await
                .ok()
                .map(|body| body.detail);
            Err(ApiError::Rejected {
                status: status.as_u16(),
                detail,
            })
        }
    }
}
