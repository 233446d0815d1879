//! Comparison error types.

/// Errors from the comparison backend.
///
/// The `Display` text is what ends up in
/// [`ComparisonState::Failed`](super::ComparisonState::Failed), so it is
/// written for end users.
#[derive(Debug, thiserror::Error)]
pub enum CompareError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("Unable to reach the comparison service")]
    Http(#[from] reqwest::Error),

    /// Backend returned a non-success status
    #[error("Failed to fetch comparison ({status}): {body}")]
    Status { status: u16, body: String },

    /// Response body did not have the expected shape
    #[error("Received an invalid response from the comparison service")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Client could not be configured
    #[error("not configured: {0}")]
    NotConfigured(String),
}

impl CompareError {
    /// Technical detail for logs, beyond the user-facing message.
    pub fn detail(&self) -> String {
        match self {
            CompareError::Http(e) => e.to_string(),
            CompareError::Json { message, body } => match body {
                Some(body) => format!("{message} (body: {body})"),
                None => message.clone(),
            },
            other => other.to_string(),
        }
    }
}
