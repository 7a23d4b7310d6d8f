//! Shared fixtures for the status-engine integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Url;

use soroscope_codec::{CodecAdapter, CodecError, LedgerKey, XdrCodec};
use soroscope_rpc::RpcClient;
use soroscope_status::{AttestationLookup, EvidenceChecks, StatusAggregator, StatusConfig, StatusError};

/// Well-known identifiers used by the fixtures.
pub const FACTORY: &str = "CFACTORYFACTORYFACTORYFACTORYFACTORYFACTORYFACTORYFACTO";
pub const ROUTER: &str = "CROUTERROUTERROUTERROUTERROUTERROUTERROUTERROUTERROUTER";
pub const TARGET: &str = "CTARGETTARGETTARGETTARGETTARGETTARGETTARGETTARGETTARGET";

/// Codec treating "wire bytes" as base64-wrapped descriptor JSON.
pub struct PassthroughCodec;

impl XdrCodec for PassthroughCodec {
    fn encode(&self, _type_name: &str, json: &str) -> Result<String, CodecError> {
        Ok(STANDARD.encode(json))
    }

    fn decode(&self, _type_name: &str, xdr_base64: &str) -> Result<String, CodecError> {
        let bytes = STANDARD
            .decode(xdr_base64)
            .map_err(|e| CodecError::malformed(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| CodecError::malformed(e.to_string()))
    }

    fn decode_stream(&self, type_name: &str, xdr_base64: &str) -> Result<Vec<String>, CodecError> {
        let json = self.decode(type_name, xdr_base64)?;
        let value: serde_json::Value =
            serde_json::from_str(&json).map_err(|e| CodecError::malformed(e.to_string()))?;
        match value {
            serde_json::Value::Array(items) => Ok(items.iter().map(|v| v.to_string()).collect()),
            other => Ok(vec![other.to_string()]),
        }
    }
}

/// Attestation lookup with a canned verdict and a call log.
pub struct RecordingLookup {
    verdict: Result<bool, String>,
    pub calls: Mutex<Vec<(String, String)>>,
}

impl RecordingLookup {
    pub fn returning(verdict: bool) -> Self {
        Self {
            verdict: Ok(verdict),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            verdict: Err(message.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("call log").len()
    }
}

#[async_trait]
impl AttestationLookup for RecordingLookup {
    async fn lookup(&self, repo: &str, wasm_hash: &str) -> Result<bool, StatusError> {
        self.calls
            .lock()
            .expect("call log")
            .push((repo.to_string(), wasm_hash.to_string()));
        match &self.verdict {
            Ok(verdict) => Ok(*verdict),
            Err(message) => Err(StatusError::attestation(message.clone())),
        }
    }
}

/// Test configuration pointing the well-known contracts at fixture IDs.
pub fn test_config() -> StatusConfig {
    StatusConfig {
        soroswap_factory_contract: FACTORY.to_string(),
        soroswap_router_contract: ROUTER.to_string(),
        ..StatusConfig::default()
    }
}

/// Evidence checks against a mock node.
pub fn checks_against(server_url: &str, lookup: Arc<dyn AttestationLookup>) -> EvidenceChecks {
    let url = Url::parse(server_url).expect("server url");
    EvidenceChecks::new(
        Arc::new(RpcClient::new(url)),
        Arc::new(CodecAdapter::from_codec(Arc::new(PassthroughCodec))),
        lookup,
        test_config(),
    )
}

/// Aggregator against a mock node.
pub fn aggregator_against(server_url: &str, lookup: Arc<dyn AttestationLookup>) -> StatusAggregator {
    let url = Url::parse(server_url).expect("server url");
    StatusAggregator::new(
        Arc::new(RpcClient::new(url)),
        Arc::new(CodecAdapter::from_codec(Arc::new(PassthroughCodec))),
        lookup,
        test_config(),
    )
}

/// Base64 "wire bytes" of a descriptor's JSON, as the passthrough codec
/// produces and consumes them.
pub fn wire(json: &serde_json::Value) -> String {
    STANDARD.encode(json.to_string())
}

/// Wire bytes of the given ledger key, as the engine encodes it.
pub fn encoded_key(key: &LedgerKey) -> String {
    STANDARD.encode(serde_json::to_string(key).expect("key json"))
}

/// Wire bytes of a contract-instance entry pointing at a module hash.
pub fn instance_entry(contract_id: &str, wasm_hash: &str) -> String {
    wire(&serde_json::json!({
        "contract_data": {
            "contract": contract_id,
            "key": "ledger_key_contract_instance",
            "durability": "persistent",
            "val": { "contract_instance": { "executable": { "wasm": wasm_hash } } },
        }
    }))
}

/// Wire bytes of a contract-code entry holding the given module bytes.
pub fn code_entry(wasm_hash: &str, module: &[u8]) -> String {
    wire(&serde_json::json!({
        "contract_code": {
            "hash": wasm_hash,
            "code": hex::encode(module),
        }
    }))
}

/// JSON-RPC envelope around a result payload.
pub fn rpc_result(result: serde_json::Value) -> String {
    serde_json::json!({ "jsonrpc": "2.0", "id": 1, "result": result }).to_string()
}

/// `getLedgerEntries` response with the given entry payloads.
pub fn entries_result(xdrs: &[String]) -> String {
    let entries: Vec<serde_json::Value> =
        xdrs.iter().map(|xdr| serde_json::json!({ "xdr": xdr })).collect();
    rpc_result(serde_json::json!({ "entries": entries }))
}

/// `getEvents` response carrying the given event payloads, no cursor.
pub fn events_result(values: &[String]) -> String {
    let events: Vec<serde_json::Value> = values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            serde_json::json!({
                "contractId": FACTORY,
                "topic": [],
                "value": value,
                "ledger": 7840,
                "id": format!("000{i}"),
            })
        })
        .collect();
    rpc_result(serde_json::json!({ "events": events }))
}

fn leb128(mut value: u32) -> Vec<u8> {
    let mut out = Vec::new();
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            break;
        }
        out.push(byte | 0x80);
    }
    out
}

/// Minimal Wasm module carrying one `contractmetav0` custom section.
pub fn module_with_meta(meta_entries: &serde_json::Value) -> Vec<u8> {
    let payload = meta_entries.to_string().into_bytes();
    let name = "contractmetav0";

    let mut body = leb128(name.len() as u32);
    body.extend_from_slice(name.as_bytes());
    body.extend_from_slice(&payload);

    let mut module = vec![0x00, 0x61, 0x73, 0x6d, 0x01, 0x00, 0x00, 0x00];
    module.push(0x00);
    module.extend(leb128(body.len() as u32));
    module.extend(body);
    module
}

/// Minimal Wasm module with no metadata section.
pub fn module_without_meta() -> Vec<u8> {
    vec![0x00, 0x61, 0x73, 0x6d, 0x01, 0x00, 0x00, 0x00]
}
