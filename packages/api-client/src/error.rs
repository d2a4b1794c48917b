use thiserror::Error;

/// Failures talking to the Marketdesk API.
///
/// A rejection (the service answered and said no) is kept separate from a
/// transport failure (the service never answered) so callers can message
/// them differently.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The service answered with a non-success status. `detail` carries the
    /// human-readable reason when the body provided one.
    #[error("rejected ({}): {}", .status, .detail.as_deref().unwrap_or("no detail"))]
    Rejected { status: u16, detail: Option<String> },

    /// The service could not be reached at all.
    #[error("transport failure: {0}")]
    Transport(#[source] reqwest::Error),

    /// The service answered successfully with a body we could not decode.
    #[error("invalid response body: {0}")]
    Decode(#[source] reqwest::Error),
}
