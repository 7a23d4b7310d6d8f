//! Error types for ledger RPC operations.

use thiserror::Error;

/// Errors that can occur while querying the ledger node.
#[derive(Error, Debug)]
pub enum RpcError {
    /// The network or HTTP layer failed, or returned a non-success status.
    #[error("transport error: {message}")]
    Transport {
        /// Error message.
        message: String,
    },

    /// The response envelope carried an application-level error object.
    #[error("rpc error: {message}")]
    Protocol {
        /// Error message reported by the node.
        message: String,
    },

    /// The response envelope could not be interpreted.
    #[error("invalid response: {message}")]
    InvalidResponse {
        /// Error message.
        message: String,
    },
}

impl RpcError {
    /// Create a transport error.
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a protocol error.
    pub fn protocol<S: Into<String>>(message: S) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Create an invalid response error.
    pub fn invalid_response<S: Into<String>>(message: S) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }
}

/// Result type for ledger RPC operations.
pub type RpcResult<T> = std::result::Result<T, RpcError>;
