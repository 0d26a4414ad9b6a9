use thiserror::Error;

/// Errors from the generative-language service client and analyzer.
#[derive(Debug, Error)]
pub enum AiError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Request to generative service failed: {0}")]
    Request(String),

    #[error("Generative service error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response from generative service: {0}")]
    InvalidResponse(String),
}

pub type AiResult<T> = Result<T, AiError>;
