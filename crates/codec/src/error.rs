//! Error types for the codec boundary.

use thiserror::Error;

/// Errors that can occur while translating ledger data.
#[derive(Error, Debug, Clone)]
pub enum CodecError {
    /// The underlying codec capability failed to initialize.
    #[error("codec not ready: {message}")]
    Uninitialized {
        /// Error message.
        message: String,
    },

    /// Structured data did not match its expected wire or descriptor shape.
    #[error("malformed ledger data: {message}")]
    Malformed {
        /// Error message.
        message: String,
    },

    /// The capability does not understand the requested descriptor type.
    #[error("unsupported descriptor type: {type_name}")]
    UnsupportedType {
        /// The offending type name.
        type_name: String,
    },
}

impl CodecError {
    /// Create an uninitialized-codec error.
    pub fn uninitialized<S: Into<String>>(message: S) -> Self {
        Self::Uninitialized {
            message: message.into(),
        }
    }

    /// Create a malformed-data error.
    pub fn malformed<S: Into<String>>(message: S) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }

    /// Create an unsupported-type error.
    pub fn unsupported_type<S: Into<String>>(type_name: S) -> Self {
        Self::UnsupportedType {
            type_name: type_name.into(),
        }
    }
}
