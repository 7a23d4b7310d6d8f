//! Engine configuration and well-known contract identifiers.

use serde::{Deserialize, Serialize};

/// Default ledger node endpoint.
pub const DEFAULT_RPC_URL: &str = "https://soroban-testnet.stellar.org:443";

/// Native asset contract on testnet.
pub const NATIVE_ASSET_CONTRACT: &str = "CDLZFC3SYJYDZT7K67VZ75HPJVIEUVNIXF47ZG2FB2RMQQVU2HHGCYSC";

/// Soroswap factory contract.
pub const SOROSWAP_FACTORY_CONTRACT: &str =
    "CBVFAI4TEJCHIICFUYN2C5VYW5TD3CKPIZ4S5P5LVVUWMF5MRLJH77NH";

/// Soroswap router contract.
pub const SOROSWAP_ROUTER_CONTRACT: &str =
    "CACIQ6HWPBEMPQYKRRAZSM6ZQORTBTS7DNXCRTI6NQYMUP2BHOXTBUVD";

/// When searching events, look back this many ledgers (about 3 hours).
pub const START_LEDGER_OFFSET: i64 = -2160;

/// Page size for event-log queries.
pub const EVENT_PAGE_LIMIT: u32 = 200;

/// Recognized repository-scheme marker in `source_repo` metadata.
pub const SOURCE_REPO_PREFIX: &str = "github:";

/// Metadata key naming the source repository of a build.
pub const SOURCE_REPO_KEY: &str = "source_repo";

/// Name of the custom module section carrying contract metadata.
pub const CONTRACT_META_SECTION: &str = "contractmetav0";

/// Configuration of the status engine.
///
/// The contract identifiers are fixed, well-known addresses (56-character
/// base32 identifiers), configuration constants rather than derived data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusConfig {
    /// Ledger node endpoint.
    pub rpc_url: String,

    /// Native asset contract identifier.
    pub native_asset_contract: String,

    /// Soroswap factory contract identifier.
    pub soroswap_factory_contract: String,

    /// Soroswap router contract identifier.
    pub soroswap_router_contract: String,

    /// Signed offset from the current ledger height bounding the event
    /// lookback window.
    pub start_ledger_offset: i64,

    /// Page size for event-log queries.
    pub event_page_limit: u32,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            native_asset_contract: NATIVE_ASSET_CONTRACT.to_string(),
            soroswap_factory_contract: SOROSWAP_FACTORY_CONTRACT.to_string(),
            soroswap_router_contract: SOROSWAP_ROUTER_CONTRACT.to_string(),
            start_ledger_offset: START_LEDGER_OFFSET,
            event_page_limit: EVENT_PAGE_LIMIT,
        }
    }
}
