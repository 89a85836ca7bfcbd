use thiserror::Error;

/// Failures talking to the budget server.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request never completed (fetch rejected)
    #[error("network request failed: {0}")]
    Network(String),

    /// The server answered with a non-2xx status
    #[error("server responded with status {0}")]
    Server(u16),

    /// Registration conflicted with an existing account
    #[error("an account with this email already exists")]
    DuplicateAccount,

    /// The response body did not have the expected shape
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(e) => ApiError::Decode(e.to_string()),
            other => ApiError::Network(other.to_string()),
        }
    }
}
