//! JSON-RPC 2.0 transport to a Soroban ledger node.

use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{RpcError, RpcResult};
use crate::models::{GetEventsRequest, GetEventsResponse, GetLedgerEntriesResponse, LatestLedger};

const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC response envelope.
#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcResponseError>,
}

/// Application-level error object inside a response envelope.
#[derive(Debug, Deserialize)]
struct RpcResponseError {
    #[serde(default)]
    message: String,
}

/// Client for the ledger's JSON-RPC query interface.
///
/// Sends exactly one request per call and never retries; retry policy
/// belongs to the caller. Cloning is cheap and shares the underlying
/// connection pool.
#[derive(Debug, Clone)]
pub struct RpcClient {
    endpoint: Url,
    http_client: Client,
}

impl RpcClient {
    /// Creates a client for the given node endpoint.
    pub fn new(endpoint: Url) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    /// Creates a client that reuses an existing HTTP client.
    pub fn with_client(http_client: Client, endpoint: Url) -> Self {
        Self {
            endpoint,
            http_client,
        }
    }

    /// Node endpoint this client talks to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Sends a single JSON-RPC request and returns the `result` payload.
    ///
    /// `params` is omitted from the envelope entirely when `None`; some
    /// methods reject an explicit empty object.
    pub async fn call(&self, method: &str, params: Option<Value>) -> RpcResult<Value> {
        let mut body = serde_json::json!({
            "jsonrpc": JSONRPC_VERSION,
            "id": 1,
            "method": method,
        });
        if let Some(params) = params {
            body["params"] = params;
        }

        debug!(method, "sending ledger rpc request");

        let response = self
            .http_client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| RpcError::transport(format!("{method}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RpcError::transport(format!("{method}: http status {status}")));
        }

        let envelope: RpcResponse = response
            .json()
            .await
            .map_err(|e| RpcError::invalid_response(format!("{method}: {e}")))?;

        if let Some(error) = envelope.error {
            return Err(RpcError::protocol(error.message));
        }

        envelope
            .result
            .ok_or_else(|| RpcError::invalid_response(format!("{method}: missing result")))
    }

    /// Returns the latest closed ledger (`getLatestLedger`).
    pub async fn get_latest_ledger(&self) -> RpcResult<LatestLedger> {
        let result = self.call("getLatestLedger", None).await?;
        serde_json::from_value(result)
            .map_err(|e| RpcError::invalid_response(format!("getLatestLedger: {e}")))
    }

    /// Fetches ledger entries for the given base64-XDR keys
    /// (`getLedgerEntries`).
    pub async fn get_ledger_entries(&self, keys: &[String]) -> RpcResult<GetLedgerEntriesResponse> {
        let params = serde_json::json!({ "keys": keys });
        let result = self.call("getLedgerEntries", Some(params)).await?;
        serde_json::from_value(result)
            .map_err(|e| RpcError::invalid_response(format!("getLedgerEntries: {e}")))
    }

    /// Issues a single page of the event-log query (`getEvents`).
    ///
    /// Callers that want the whole log should use
    /// [`fetch_all_events`](RpcClient::fetch_all_events) instead.
    pub async fn get_events(&self, request: &GetEventsRequest) -> RpcResult<GetEventsResponse> {
        let params = serde_json::to_value(request)
            .map_err(|e| RpcError::invalid_response(format!("getEvents params: {e}")))?;
        let result = self.call("getEvents", Some(params)).await?;
        serde_json::from_value(result)
            .map_err(|e| RpcError::invalid_response(format!("getEvents: {e}")))
    }
}
