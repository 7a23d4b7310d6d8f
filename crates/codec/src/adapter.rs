//! Translation boundary between typed descriptors and the wire binary form.

use std::sync::Arc;

use futures::future::BoxFuture;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::error::CodecError;
use crate::ledger::{LedgerEntryData, LedgerKey};
use crate::scval::{ScMetaEntry, ScVal};

/// Descriptor type names understood by the capability.
const TYPE_LEDGER_KEY: &str = "LedgerKey";
const TYPE_LEDGER_ENTRY_DATA: &str = "LedgerEntryData";
const TYPE_SC_VAL: &str = "ScVal";
const TYPE_SC_META_ENTRY: &str = "ScMetaEntry";

/// The opaque XDR codec capability.
///
/// Implementations translate between JSON descriptor text and base64-encoded
/// wire bytes for a named wire type. The engine never interprets raw binary
/// itself; everything flows through this seam.
pub trait XdrCodec: Send + Sync {
    /// Encodes a JSON descriptor into base64 wire bytes.
    fn encode(&self, type_name: &str, json: &str) -> Result<String, CodecError>;

    /// Decodes base64 wire bytes into a JSON descriptor.
    fn decode(&self, type_name: &str, xdr_base64: &str) -> Result<String, CodecError>;

    /// Decodes a base64 stream of consecutive wire values into one JSON
    /// descriptor per value.
    fn decode_stream(&self, type_name: &str, xdr_base64: &str) -> Result<Vec<String>, CodecError>;
}

/// Factory producing the codec capability on first use.
pub type CodecFactory =
    Box<dyn Fn() -> BoxFuture<'static, Result<Arc<dyn XdrCodec>, CodecError>> + Send + Sync>;

/// Adapter translating typed descriptors through the codec capability.
///
/// Initialization of the capability is lazy and memoized for the process
/// lifetime: the first caller pays the cost, concurrent first calls
/// serialize on a single attempt, and every later caller shares the result.
/// The adapter performs no caching of translated values.
pub struct CodecAdapter {
    factory: CodecFactory,
    handle: OnceCell<Arc<dyn XdrCodec>>,
}

impl CodecAdapter {
    /// Creates an adapter that initializes the capability on first use.
    pub fn new(factory: CodecFactory) -> Self {
        Self {
            factory,
            handle: OnceCell::new(),
        }
    }

    /// Creates an adapter over an already-initialized capability.
    pub fn from_codec(codec: Arc<dyn XdrCodec>) -> Self {
        Self {
            factory: Box::new(|| {
                Box::pin(async {
                    Err(CodecError::uninitialized("codec handle was pre-initialized"))
                })
            }),
            handle: OnceCell::new_with(Some(codec)),
        }
    }

    async fn codec(&self) -> Result<&Arc<dyn XdrCodec>, CodecError> {
        self.handle
            .get_or_try_init(|| {
                debug!("initializing xdr codec capability");
                (self.factory)()
            })
            .await
    }

    /// Encodes a ledger key to base64 wire bytes.
    pub async fn encode_key(&self, key: &LedgerKey) -> Result<String, CodecError> {
        let json = serde_json::to_string(key)
            .map_err(|e| CodecError::malformed(format!("ledger key descriptor: {e}")))?;
        self.codec().await?.encode(TYPE_LEDGER_KEY, &json)
    }

    /// Encodes a contract value to base64 wire bytes.
    pub async fn encode_value(&self, value: &ScVal) -> Result<String, CodecError> {
        let json = serde_json::to_string(value)
            .map_err(|e| CodecError::malformed(format!("contract value descriptor: {e}")))?;
        self.codec().await?.encode(TYPE_SC_VAL, &json)
    }

    /// Decodes a ledger entry from base64 wire bytes.
    pub async fn decode_entry(&self, xdr_base64: &str) -> Result<LedgerEntryData, CodecError> {
        let json = self.codec().await?.decode(TYPE_LEDGER_ENTRY_DATA, xdr_base64)?;
        serde_json::from_str(&json)
            .map_err(|e| CodecError::malformed(format!("ledger entry: {e}")))
    }

    /// Decodes an event payload from base64 wire bytes.
    ///
    /// Event payloads arrive as single-value streams.
    pub async fn decode_event_value(&self, xdr_base64: &str) -> Result<ScVal, CodecError> {
        let parts = self.codec().await?.decode_stream(TYPE_SC_VAL, xdr_base64)?;
        let first = parts
            .into_iter()
            .next()
            .ok_or_else(|| CodecError::malformed("empty event value stream"))?;
        serde_json::from_str(&first)
            .map_err(|e| CodecError::malformed(format!("event value: {e}")))
    }

    /// Decodes a contract-metadata section from base64 wire bytes.
    pub async fn decode_meta_entries(
        &self,
        xdr_base64: &str,
    ) -> Result<Vec<ScMetaEntry>, CodecError> {
        let parts = self.codec().await?.decode_stream(TYPE_SC_META_ENTRY, xdr_base64)?;
        parts
            .iter()
            .map(|json| {
                serde_json::from_str(json)
                    .map_err(|e| CodecError::malformed(format!("metadata entry: {e}")))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Codec that treats "wire bytes" as base64-wrapped descriptor JSON.
    struct PassthroughCodec;

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

        fn decode_stream(
            &self,
            type_name: &str,
            xdr_base64: &str,
        ) -> Result<Vec<String>, CodecError> {
            let json = self.decode(type_name, xdr_base64)?;
            let value: serde_json::Value =
                serde_json::from_str(&json).map_err(|e| CodecError::malformed(e.to_string()))?;
            match value {
                serde_json::Value::Array(items) => Ok(items.iter().map(|v| v.to_string()).collect()),
                other => Ok(vec![other.to_string()]),
            }
        }
    }

    fn adapter() -> CodecAdapter {
        CodecAdapter::from_codec(Arc::new(PassthroughCodec))
    }

    #[tokio::test]
    async fn key_roundtrips_through_capability() {
        let adapter = adapter();
        let key = LedgerKey::contract_instance("CCONTRACT");
        let encoded = adapter.encode_key(&key).await.expect("encode");
        let json = PassthroughCodec.decode("LedgerKey", &encoded).expect("decode");
        assert!(json.contains("ledger_key_contract_instance"));
    }

    #[tokio::test]
    async fn event_value_takes_first_stream_element() {
        let adapter = adapter();
        let xdr = STANDARD.encode(r#"{"symbol":"mint"}"#);
        let value = adapter.decode_event_value(&xdr).await.expect("decode");
        assert_eq!(value, ScVal::Symbol("mint".to_string()));
    }

    #[tokio::test]
    async fn meta_entries_decode_as_stream() {
        let adapter = adapter();
        let xdr = STANDARD.encode(
            r#"[{"sc_meta_v0":{"key":"rsver","val":"1.75.0"}},
                {"sc_meta_v0":{"key":"source_repo","val":"github:octo/demo"}}]"#,
        );
        let entries = adapter.decode_meta_entries(&xdr).await.expect("decode");
        assert_eq!(entries.len(), 2);
        let ScMetaEntry::ScMetaV0(meta) = &entries[1];
        assert_eq!(meta.key, "source_repo");
    }

    #[tokio::test]
    async fn malformed_entry_surfaces_codec_error() {
        let adapter = adapter();
        let xdr = STANDARD.encode(r#"{"unexpected":"shape"}"#);
        let error = adapter.decode_entry(&xdr).await.expect_err("should fail");
        assert!(matches!(error, CodecError::Malformed { .. }), "got {error:?}");
    }

    #[tokio::test]
    async fn concurrent_first_use_initializes_once() {
        static INITS: AtomicUsize = AtomicUsize::new(0);

        let adapter = Arc::new(CodecAdapter::new(Box::new(|| {
            Box::pin(async {
                INITS.fetch_add(1, Ordering::SeqCst);
                Ok(Arc::new(PassthroughCodec) as Arc<dyn XdrCodec>)
            })
        })));

        let key = LedgerKey::contract_code("abc123");
        let (a, b, c) = tokio::join!(
            adapter.encode_key(&key),
            adapter.encode_key(&key),
            adapter.encode_key(&key),
        );
        a.expect("encode");
        b.expect("encode");
        c.expect("encode");

        assert_eq!(INITS.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_initialization_is_reported() {
        let adapter = CodecAdapter::new(Box::new(|| {
            Box::pin(async { Err(CodecError::uninitialized("capability unavailable")) })
        }));

        let error = adapter
            .encode_key(&LedgerKey::contract_code("abc123"))
            .await
            .expect_err("should fail");
        assert!(matches!(error, CodecError::Uninitialized { .. }), "got {error:?}");
    }
}
