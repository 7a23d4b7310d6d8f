//! The consolidated per-contract status record.

use serde::{Deserialize, Serialize};

/// Consolidated status of one contract.
///
/// Produced fresh on every aggregation run; never merged with a prior
/// value. Fields that could not be resolved read `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractStatus {
    /// The contract's instance slot exists on the ledger.
    pub deployed: bool,

    /// The contract's build metadata is verifiable (see the build check
    /// for the exact acceptance rules).
    pub build_verified: bool,

    /// The contract emitted a mint event within the lookback window.
    pub minted: bool,

    /// The contract appears as a token of a Soroswap pair creation.
    pub soroswap_pair: bool,

    /// The contract appears as a token of a Soroswap liquidity deposit.
    pub soroswap_liquidity: bool,

    /// The contract appears on the path of a Soroswap swap.
    pub soroswap_swapped: bool,
}
