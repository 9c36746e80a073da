use thiserror::Error;

use crate::transport::TransportError;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Caller contract violation, raised before any request is sent.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("remote request failed ({status}): {message}")]
    Remote { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("malformed response: {0}")]
    Decode(String),
}

impl ClientError {
    /// True for every failure that happened on or beyond the wire.
    pub fn is_remote_request(&self) -> bool {
        !matches!(self, ClientError::InvalidArgument(_))
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}
