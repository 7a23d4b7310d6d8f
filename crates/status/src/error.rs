//! Error types for evidence checks and aggregation.

use soroscope_codec::CodecError;
use soroscope_rpc::RpcError;
use thiserror::Error;

/// Errors that can occur inside an evidence check.
///
/// Checks are a containment boundary: the aggregator maps any of these to a
/// negative fact for the affected field rather than propagating further.
#[derive(Error, Debug)]
pub enum StatusError {
    /// Ledger query failed.
    #[error(transparent)]
    Rpc(#[from] RpcError),

    /// Ledger data could not be translated.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// The attestation registry could not be consulted.
    #[error("attestation lookup failed: {message}")]
    Attestation {
        /// Error message.
        message: String,
    },

    /// An expected ledger entry or metadata record is absent.
    #[error("{what} not found")]
    NotFound {
        /// What was being looked for.
        what: String,
    },
}

impl StatusError {
    /// Create an attestation-lookup error.
    pub fn attestation<S: Into<String>>(message: S) -> Self {
        Self::Attestation {
            message: message.into(),
        }
    }

    /// Create a not-found error.
    pub fn not_found<S: Into<String>>(what: S) -> Self {
        Self::NotFound { what: what.into() }
    }
}
