use std::time::Duration;
use thiserror::Error;

/// Failures while opening or consuming a streaming response
#[derive(Debug, Clone, Error)]
pub enum StreamingError {
    /// Network-related errors (connection, DNS, truncated body, ...)
    #[error("Network error: {message}")]
    NetworkError { message: String },

    /// Non-success HTTP status or an error object inside the stream
    #[error("API error ({status_code}): {message}")]
    ApiError { status_code: u16, message: String },

    /// An event that is not valid Gemini JSON
    #[error("Parse error: {message}")]
    ParseError {
        message: String,
        raw_response: String,
    },

    /// No data arrived within the allowed window
    #[error("Timeout during {operation} after {duration:?}")]
    TimeoutError {
        operation: String,
        duration: Duration,
    },

    /// The model refused the prompt or stopped without writing anything
    #[error("Model returned no content: {reason}")]
    NoContent { reason: String },
}

impl StreamingError {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}
