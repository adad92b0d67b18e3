use thiserror::Error;

/// Errors that can occur within a `PriceProvider` implementation.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport failure: connection refused, timeout, TLS, and so on.
    #[error("API request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response body could not be turned into price points.
    #[error("Malformed response: {0}")]
    Parse(String),

    /// The request parameters were rejected before sending.
    #[error("Invalid parameters for provider: {0}")]
    Validation(String),
}

impl ProviderError {
    /// True for failures where the service never produced a usable answer
    /// (transport errors and 5xx statuses).
    pub fn is_unavailable(&self) -> bool {
        match self {
            ProviderError::Request(_) => true,
            ProviderError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// Errors that can occur while constructing a provider.
#[derive(Debug, Error)]
pub enum ProviderInitError {
    /// failed to init reqwest client
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),

    /// The configured base URL is not an absolute http(s) URL.
    #[error("Invalid base URL '{0}'")]
    InvalidBaseUrl(String),
}
