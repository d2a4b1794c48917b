//! Wire models for the Marketdesk auth endpoints.

use serde::{Deserialize, Serialize};

/// Body of a registration request.
#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

/// Registrar acknowledgement. The account is held pending until the
/// passcode is confirmed; the passcode itself travels in this response.
#[derive(Debug, Clone, Deserialize)]
pub struct SignupResponse {
    #[serde(rename = "OTP")]
    pub otp: String,
    #[serde(default)]
    pub pending: bool,
}

/// Body of a passcode confirmation request.
#[derive(Debug, Clone, Serialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub code: String,
}

/// Token material issued on successful verification or login.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Answer of the user-status lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUserResponse {
    pub is_new_user: bool,
}

/// Error body the service attaches to rejections.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub detail: String,
}
