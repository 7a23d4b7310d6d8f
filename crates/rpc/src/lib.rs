//! # Soroscope RPC
//!
//! JSON-RPC 2.0 transport for Soroban ledger nodes, plus the paginated
//! event fetcher used by the status engine.
//!
//! The transport sends one request per call and surfaces failures as
//! [`RpcError`]; retry policy belongs to callers. Event-log queries walk
//! the server cursor until it is exhausted or the consecutive-empty-batch
//! cap is reached.

pub mod error;
pub mod models;

mod client;
mod events;

pub use client::RpcClient;
pub use error::{RpcError, RpcResult};
pub use events::MAX_EMPTY_PAGES;
pub use models::{
    Event, EventFilter, GetEventsRequest, GetEventsResponse, GetLedgerEntriesResponse,
    LatestLedger, LedgerEntry, Pagination, TOPIC_WILDCARD,
};
