use std::io;
use std::time::Duration;

use thiserror::Error;

/// Classes of well-formed error responses a receiver can send for a
/// correlated request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiverErrorKind {
    LaunchError,
    LoadCancelled,
    LoadFailed,
    InvalidPlayerState,
    InvalidRequest,
    Error,
}

#[derive(Debug, Error)]
pub enum Error {
    /// TLS open failed, a frame was malformed, or the stream hit EOF
    /// mid-frame. Fatal for the channel; all pending requests fail.
    #[error("transport failure: {0}")]
    Transport(#[from] io::Error),

    #[error("TLS setup failed: {0}")]
    Tls(#[from] native_tls::Error),

    /// The request-level deadline expired. The channel remains open.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The channel or the virtual connection closed before a response
    /// arrived.
    #[error("connection closed")]
    ConnectionClosed,

    /// A correlated response was of an unexpected variant or was missing a
    /// required field.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// The receiver answered with a well-formed error response.
    #[error("receiver error: {kind:?} (reason: {reason:?})")]
    Receiver {
        kind: ReceiverErrorKind,
        reason: Option<String>,
        detailed_error_code: Option<i64>,
        item_id: Option<i64>,
    },

    #[error("malformed payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("illegal state: {0}")]
    IllegalState(&'static str),
}

impl Error {
    pub(crate) fn protocol<T: Into<String>>(message: T) -> Self {
        Error::Protocol(message.into())
    }
}
