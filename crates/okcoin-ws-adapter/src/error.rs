/*
[INPUT]:  Error sources (transport, wire protocol, record decoding, caller input)
[OUTPUT]: Structured error types with recovery hints
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use thiserror::Error;

/// Main error type for the OKCoin WebSocket adapter
#[derive(Error, Debug)]
pub enum OkcoinError {
    /// Dial, read, write or close failed; the session must be reconnected
    #[error("Connection error: {0}")]
    Connection(String),

    /// The server answered with something the protocol does not allow
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// A payload field had the wrong type or shape
    #[error("Decode error on channel {channel}, field {field}: {reason}")]
    Decode {
        channel: String,
        field: String,
        reason: String,
    },

    /// The envelope carried a channel with no known record type
    #[error("Unrecognized channel: {0}")]
    UnrecognizedChannel(String),

    /// Caller input rejected before anything reached the transport
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization of an outbound message failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Endpoint URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl OkcoinError {
    /// Check if the error ends the current session
    pub fn is_fatal(&self) -> bool {
        matches!(self, OkcoinError::Connection(_))
    }

    /// Check if the session can keep reading after this error
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            OkcoinError::Protocol(_)
                | OkcoinError::Decode { .. }
                | OkcoinError::UnrecognizedChannel(_)
        )
    }

    /// Check if the error was raised by input validation
    pub fn is_validation(&self) -> bool {
        matches!(self, OkcoinError::Validation(_))
    }

    pub(crate) fn decode(
        channel: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        OkcoinError::Decode {
            channel: channel.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for OkcoinError {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        use tokio_tungstenite::tungstenite::Error;
        match err {
            Error::ConnectionClosed | Error::AlreadyClosed => {
                OkcoinError::Connection("connection closed".to_string())
            }
            Error::Http(resp) => {
                OkcoinError::Connection(format!("handshake rejected: {}", resp.status()))
            }
            other => OkcoinError::Connection(other.to_string()),
        }
    }
}

/// Result type alias for OKCoin operations
pub type Result<T> = std::result::Result<T, OkcoinError>;
