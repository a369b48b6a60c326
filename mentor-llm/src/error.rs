use thiserror::Error;

/// Failures of a content generation request.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("local model request failed: {0}")]
    Local(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("inference API returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("the model returned no text")]
    EmptyOutput,
}

impl GenerationError {
    /// Transport-level failures are worth retrying; content problems are not.
    pub fn is_transient(&self) -> bool {
        match self {
            GenerationError::Local(_) | GenerationError::Network(_) => true,
            GenerationError::Status { status, .. } => *status == 429 || *status >= 500,
            GenerationError::MalformedResponse(_) | GenerationError::EmptyOutput => false,
        }
    }
}

/// Trim generated text and reject blank output.
pub(crate) fn non_empty(text: &str) -> Result<String, GenerationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Err(GenerationError::EmptyOutput)
    } else {
        Ok(trimmed.to_owned())
    }
}
