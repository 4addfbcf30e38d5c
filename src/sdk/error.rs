use thiserror::Error;

/// Failures of the network/file collaborators feeding the core.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("API Error (Code {code}): {message}")]
    ApiError { code: u16, message: String },

    // Service-level failure reported inside a successful HTTP response
    #[error("Unstructured API Error: {0}")]
    RawApiError(String),

    #[error("Underlying request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Failed to read local data: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read CSV data: {0}")]
    Csv(#[from] csv::Error),

    #[error("Gave up after {attempts} attempts: {last}")]
    Exhausted {
        attempts: u32,
        #[source]
        last: Box<ProviderError>,
    },
}

impl ProviderError {
    /// Whether retrying the same request might succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::ApiError { code, .. } => *code == 429 || *code >= 500,
            Self::RawApiError(_) => true,
            Self::RequestError(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            Self::ParseError(_) | Self::Io(_) | Self::Csv(_) | Self::Exhausted { .. } => false,
        }
    }
}
