use thiserror::Error;

/// Failure kinds reported by the gateway handlers.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Payload did not parse or is not the expected shape.
    #[error("malformed request: {0}")]
    MalformedInput(String),

    /// Action outside the closed set; carries the action verbatim.
    #[error("unsupported action: {0}")]
    UnsupportedAction(String),

    /// Serializing validated data failed at this boundary.
    #[error("failed to encode response: {0}")]
    EncodingFailure(#[from] serde_json::Error),

    #[error("missing required environment variables")]
    MissingConfiguration,

    #[error("Unauthorized")]
    Unauthorized,
}

impl GatewayError {
    /// HTTP status used when the error is surfaced as a transport response.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Unauthorized => 401,
            Self::MalformedInput(_)
            | Self::UnsupportedAction(_)
            | Self::EncodingFailure(_)
            | Self::MissingConfiguration => 500,
        }
    }
}

/// Error text returned by an external service call.
///
/// Not a `GatewayError`: it never becomes a transport failure and is carried
/// in the envelope's `err` field of a 200 response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ServiceError {
    message: String,
}

impl ServiceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
