//! The six independent evidence checks.

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::{debug, warn};

use soroscope_codec::{CodecAdapter, CodecError, LedgerKey, ScMetaEntry, ScVal};
use soroscope_rpc::{EventFilter, GetEventsRequest, Pagination, RpcClient, TOPIC_WILDCARD};

use crate::attestation::AttestationLookup;
use crate::config::{StatusConfig, CONTRACT_META_SECTION, SOURCE_REPO_KEY, SOURCE_REPO_PREFIX};
use crate::error::StatusError;
use crate::wasm_meta;

/// Named source emitted as the first topic of factory events.
const SOROSWAP_FACTORY_SOURCE: &str = "SoroswapFactory";

/// Named source emitted as the first topic of router events.
const SOROSWAP_ROUTER_SOURCE: &str = "SoroswapRouter";

/// Evidence checks over one ledger node.
///
/// Each check resolves one boolean fact about a contract. Checks that
/// reason about events take the starting-ledger bound as an argument so a
/// whole aggregation run shares one bound; see
/// [`StatusAggregator`](crate::StatusAggregator).
pub struct EvidenceChecks {
    rpc: Arc<RpcClient>,
    codec: Arc<CodecAdapter>,
    attestations: Arc<dyn AttestationLookup>,
    config: StatusConfig,
}

impl EvidenceChecks {
    /// Creates the check set over shared transport, codec, and attestation
    /// collaborators.
    pub fn new(
        rpc: Arc<RpcClient>,
        codec: Arc<CodecAdapter>,
        attestations: Arc<dyn AttestationLookup>,
        config: StatusConfig,
    ) -> Self {
        Self {
            rpc,
            codec,
            attestations,
            config,
        }
    }

    /// Whether the contract's instance slot exists on the ledger.
    pub async fn deployed(&self, contract_id: &str) -> Result<bool, StatusError> {
        let key = LedgerKey::contract_instance(contract_id);
        let key_xdr = self.codec.encode_key(&key).await?;
        let result = self.rpc.get_ledger_entries(&[key_xdr]).await?;
        Ok(!result.entries.is_empty())
    }

    /// Whether the contract emitted a mint event within the lookback window.
    ///
    /// Matches both two-topic and three-topic mint shapes.
    pub async fn minted(&self, contract_id: &str, start_ledger: u32) -> Result<bool, StatusError> {
        let mint = self
            .codec
            .encode_value(&ScVal::Symbol("mint".to_string()))
            .await?;
        let request = GetEventsRequest {
            filters: vec![EventFilter::contract(
                vec![contract_id.to_string()],
                vec![
                    vec![mint.clone(), TOPIC_WILDCARD.to_string()],
                    vec![
                        mint,
                        TOPIC_WILDCARD.to_string(),
                        TOPIC_WILDCARD.to_string(),
                    ],
                ],
            )],
            start_ledger: Some(start_ledger),
            pagination: Pagination::with_limit(self.config.event_page_limit),
        };
        let events = self.rpc.fetch_all_events(request).await?;
        Ok(!events.is_empty())
    }

    /// Whether the contract's build is verifiable from its embedded
    /// metadata.
    ///
    /// Resolution proceeds instance entry → module hash → module bytes →
    /// `contractmetav0` sections → `source_repo` entry. A missing link in
    /// that chain terminates at `false`. A `source_repo` without the
    /// recognized repository-scheme marker is accepted as sufficient
    /// evidence on its own; a marked one must have a matching attestation.
    pub async fn build_verified(&self, contract_id: &str) -> Result<bool, StatusError> {
        let wasm_hash = match self.wasm_hash(contract_id).await {
            Ok(hash) => hash,
            Err(error) => {
                debug!(contract_id, %error, "no resolvable module hash");
                return Ok(false);
            }
        };

        let module = match self.wasm_module(&wasm_hash).await {
            Ok(module) => module,
            Err(error) => {
                debug!(contract_id, %wasm_hash, %error, "no resolvable module bytes");
                return Ok(false);
            }
        };

        for section in wasm_meta::custom_sections(&module, CONTRACT_META_SECTION)? {
            let section_xdr = STANDARD.encode(section);
            let entries = self.codec.decode_meta_entries(&section_xdr).await?;
            for ScMetaEntry::ScMetaV0(meta) in entries {
                if meta.key != SOURCE_REPO_KEY {
                    continue;
                }
                return match meta.val.strip_prefix(SOURCE_REPO_PREFIX) {
                    Some(repo) => self.attestations.lookup(repo, &wasm_hash).await,
                    None => Ok(true),
                };
            }
        }

        Ok(false)
    }

    /// Whether the contract is a token of a Soroswap pair creation.
    pub async fn soroswap_pair(
        &self,
        contract_id: &str,
        start_ledger: u32,
    ) -> Result<bool, StatusError> {
        let values = self
            .soroswap_event_values(
                &self.config.soroswap_factory_contract,
                SOROSWAP_FACTORY_SOURCE,
                "new_pair",
                start_ledger,
            )
            .await?;
        Ok(values
            .iter()
            .any(|value| map_holds_address(value, &["token_0", "token_1"], contract_id)))
    }

    /// Whether the contract is a token of a Soroswap liquidity deposit.
    pub async fn soroswap_liquidity(
        &self,
        contract_id: &str,
        start_ledger: u32,
    ) -> Result<bool, StatusError> {
        let values = self
            .soroswap_event_values(
                &self.config.soroswap_router_contract,
                SOROSWAP_ROUTER_SOURCE,
                "add",
                start_ledger,
            )
            .await?;
        Ok(values
            .iter()
            .any(|value| map_holds_address(value, &["token_a", "token_b"], contract_id)))
    }

    /// Whether the contract appears on the path of a Soroswap swap.
    pub async fn soroswap_swapped(
        &self,
        contract_id: &str,
        start_ledger: u32,
    ) -> Result<bool, StatusError> {
        let values = self
            .soroswap_event_values(
                &self.config.soroswap_router_contract,
                SOROSWAP_ROUTER_SOURCE,
                "swap",
                start_ledger,
            )
            .await?;
        Ok(values
            .iter()
            .any(|value| path_holds_address(value, contract_id)))
    }

    /// Resolves the content hash of the module a contract instance runs.
    async fn wasm_hash(&self, contract_id: &str) -> Result<String, StatusError> {
        let key = LedgerKey::contract_instance(contract_id);
        let key_xdr = self.codec.encode_key(&key).await?;
        let result = self.rpc.get_ledger_entries(&[key_xdr]).await?;
        let entry = result
            .entries
            .first()
            .ok_or_else(|| StatusError::not_found("contract instance"))?;
        let data = self.codec.decode_entry(&entry.xdr).await?;
        data.wasm_hash()
            .map(str::to_string)
            .ok_or_else(|| StatusError::not_found("contract executable hash"))
    }

    /// Fetches the module bytes stored under a content hash.
    async fn wasm_module(&self, wasm_hash: &str) -> Result<Vec<u8>, StatusError> {
        let key = LedgerKey::contract_code(wasm_hash);
        let key_xdr = self.codec.encode_key(&key).await?;
        let result = self.rpc.get_ledger_entries(&[key_xdr]).await?;
        let entry = result
            .entries
            .first()
            .ok_or_else(|| StatusError::not_found("contract code"))?;
        let data = self.codec.decode_entry(&entry.xdr).await?;
        match data {
            soroscope_codec::LedgerEntryData::ContractCode(code) => hex::decode(&code.code)
                .map_err(|e| {
                    StatusError::Codec(CodecError::malformed(format!("module bytes: {e}")))
                }),
            _ => Err(StatusError::not_found("contract code entry")),
        }
    }

    /// Fetches and decodes the payloads of Soroswap events with the given
    /// source/action topic pair.
    async fn soroswap_event_values(
        &self,
        source_contract: &str,
        source: &str,
        action: &str,
        start_ledger: u32,
    ) -> Result<Vec<ScVal>, StatusError> {
        let source_topic = self
            .codec
            .encode_value(&ScVal::String(source.to_string()))
            .await?;
        let action_topic = self
            .codec
            .encode_value(&ScVal::Symbol(action.to_string()))
            .await?;

        let request = GetEventsRequest {
            filters: vec![EventFilter::contract(
                vec![source_contract.to_string()],
                vec![vec![source_topic, action_topic]],
            )],
            start_ledger: Some(start_ledger),
            pagination: Pagination::with_limit(self.config.event_page_limit),
        };
        let events = self.rpc.fetch_all_events(request).await?;
        debug!(source, action, count = events.len(), "soroswap events fetched");

        let mut values = Vec::with_capacity(events.len());
        for event in &events {
            match self.codec.decode_event_value(&event.value).await {
                Ok(value) => values.push(value),
                Err(error) => {
                    // One undecodable payload must not hide the others.
                    warn!(event = %event.id, %error, "skipping undecodable event payload");
                }
            }
        }
        Ok(values)
    }
}

/// Whether `value` is a map holding `address` under any of `keys`.
fn map_holds_address(value: &ScVal, keys: &[&str], address: &str) -> bool {
    let Some(entries) = value.as_map() else {
        return false;
    };
    entries.iter().any(|entry| {
        entry
            .key
            .as_symbol()
            .is_some_and(|key| keys.contains(&key))
            && entry.val.as_address() == Some(address)
    })
}

/// Whether `value` is a map whose `path` vector holds `address`.
fn path_holds_address(value: &ScVal, address: &str) -> bool {
    let Some(entries) = value.as_map() else {
        return false;
    };
    entries
        .iter()
        .filter(|entry| entry.key.as_symbol() == Some("path"))
        .any(|entry| {
            entry
                .val
                .as_vec()
                .is_some_and(|path| path.iter().any(|hop| hop.as_address() == Some(address)))
        })
}
