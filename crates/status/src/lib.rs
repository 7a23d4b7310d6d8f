//! # Soroscope Status
//!
//! The contract status aggregation engine: six independent evidence checks
//! over a Soroban ledger (deployment, build attestation, mint activity, and
//! Soroswap pair/liquidity/swap participation), merged into one consolidated
//! per-contract status record with partial-failure tolerance.
//!
//! Every check degrades to a negative fact on failure; the aggregator never
//! fails as a whole. All event-based checks of one aggregation run share a
//! single starting-ledger bound so they reason about the same time window.

pub mod attestation;
pub mod config;
pub mod error;

mod aggregator;
mod checks;
mod status;
mod wasm_meta;

pub use aggregator::StatusAggregator;
pub use attestation::{AttestationLookup, HttpAttestationLookup};
pub use checks::EvidenceChecks;
pub use config::StatusConfig;
pub use error::StatusError;
pub use status::ContractStatus;
