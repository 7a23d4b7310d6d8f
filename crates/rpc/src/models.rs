//! Request and response models for the ledger JSON-RPC interface.

use serde::{Deserialize, Serialize};

/// Wildcard topic segment accepted by the event-log query.
pub const TOPIC_WILDCARD: &str = "*";

/// Result of `getLatestLedger`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestLedger {
    /// Sequence number of the latest closed ledger.
    pub sequence: u32,

    /// Protocol version the ledger was closed with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol_version: Option<u32>,

    /// Ledger identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// A single ledger entry returned by `getLedgerEntries`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    /// Entry key, base64-encoded XDR.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// Entry data, base64-encoded XDR.
    pub xdr: String,

    /// Ledger sequence at which the entry was last modified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_ledger_seq: Option<u32>,
}

/// Result of `getLedgerEntries`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetLedgerEntriesResponse {
    /// Entries found for the requested keys. Absent keys produce no entry.
    #[serde(default)]
    pub entries: Vec<LedgerEntry>,

    /// Latest ledger known to the node at response time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_ledger: Option<u32>,
}

/// One structured notification from the ledger event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Identifier of the contract that emitted the event.
    #[serde(default)]
    pub contract_id: String,

    /// Event topics, each base64-encoded XDR.
    #[serde(default)]
    pub topic: Vec<String>,

    /// Event payload, base64-encoded XDR.
    #[serde(default)]
    pub value: String,

    /// Sequence of the ledger the event was emitted in.
    #[serde(default)]
    pub ledger: u32,

    /// Unique event identifier.
    #[serde(default)]
    pub id: String,

    /// Hash of the transaction that emitted the event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
}

/// A filter row for the event-log query.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventFilter {
    /// Filter kind; the engine only issues `"contract"` filters.
    #[serde(rename = "type")]
    pub filter_type: String,

    /// Contract identifiers to match.
    pub contract_ids: Vec<String>,

    /// Topic patterns; each inner row is matched positionally, with
    /// [`TOPIC_WILDCARD`] accepting any segment.
    pub topics: Vec<Vec<String>>,
}

impl EventFilter {
    /// Builds a contract-event filter for the given identifiers and topics.
    pub fn contract(contract_ids: Vec<String>, topics: Vec<Vec<String>>) -> Self {
        Self {
            filter_type: "contract".to_string(),
            contract_ids,
            topics,
        }
    }
}

/// Pagination block of the event-log query.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Continuation cursor from the previous page, absent on the first call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,

    /// Maximum number of events per page.
    pub limit: u32,
}

impl Pagination {
    /// Pagination for a fresh query with the given page size.
    pub fn with_limit(limit: u32) -> Self {
        Self {
            cursor: None,
            limit,
        }
    }
}

/// Parameters of a `getEvents` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetEventsRequest {
    /// Filter rows; events matching any row are returned.
    pub filters: Vec<EventFilter>,

    /// Starting ledger bound. Supplied on the first call of a paginated
    /// query only; continuation calls carry the cursor instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_ledger: Option<u32>,

    /// Pagination block.
    pub pagination: Pagination,
}

/// Result of a single `getEvents` call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetEventsResponse {
    /// Events in the server's natural ledger order.
    #[serde(default)]
    pub events: Vec<Event>,

    /// Continuation cursor, absent once the query is exhausted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,

    /// Latest ledger known to the node at response time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_ledger: Option<u64>,
}
