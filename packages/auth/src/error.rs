use thiserror::Error;

/// Failure taxonomy for the auth core.
///
/// Every variant is recoverable: the worst outcome is remaining on the
/// current screen. Remote failures are caught at the call site and turned
/// into user-visible notices; none leaves a component silently.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Client-detected input problem; never sent to the remote side.
    #[error("{0}")]
    Validation(String),

    /// The remote side declined the credentials or the registration.
    #[error("{}", .reason.as_deref().unwrap_or("authentication rejected"))]
    Rejected { reason: Option<String> },

    /// The entered code does not match the open challenge.
    #[error("Invalid verification code")]
    ChallengeMismatch,

    /// The remote side could not be reached at all. Distinct from a
    /// rejection; the two must never be conflated in messaging.
    #[error("network failure: {0}")]
    Unreachable(String),

    /// Token acquired but the first-time-user check failed. The session is
    /// still valid; the user takes the default flow.
    #[error("could not verify user status: {0}")]
    StatusLookup(String),
}

impl From<api_client::ApiError> for AuthError {
    fn from(err: api_client::ApiError) -> Self {
        match err {
            api_client::ApiError::Rejected { detail, .. } => AuthError::Rejected { reason: detail },
            api_client::ApiError::Transport(source) => AuthError::Unreachable(source.to_string()),
            api_client::ApiError::Decode(source) => AuthError::Unreachable(source.to_string()),
        }
    }
}
