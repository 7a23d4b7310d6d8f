//! Ledger-key and ledger-entry descriptors.

use serde::{Deserialize, Serialize};

use crate::scval::{ContractExecutable, ScVal};

/// Storage lifetime class of a contract-data entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Durability {
    Temporary,
    Persistent,
}

/// Key of a contract-data storage slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerKeyContractData {
    /// Contract identifier the slot belongs to.
    pub contract: String,
    /// Slot key within the contract's storage.
    pub key: ScVal,
    /// Lifetime class of the slot.
    pub durability: Durability,
}

/// Key of an uploaded contract module, addressed by content hash (hex).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerKeyContractCode {
    pub hash: String,
}

/// Key identifying one persistent storage slot on the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerKey {
    ContractData(LedgerKeyContractData),
    ContractCode(LedgerKeyContractCode),
}

impl LedgerKey {
    /// Key of a contract's instance slot.
    pub fn contract_instance(contract_id: &str) -> Self {
        Self::ContractData(LedgerKeyContractData {
            contract: contract_id.to_string(),
            key: ScVal::LedgerKeyContractInstance,
            durability: Durability::Persistent,
        })
    }

    /// Key of an uploaded contract module.
    pub fn contract_code(wasm_hash: &str) -> Self {
        Self::ContractCode(LedgerKeyContractCode {
            hash: wasm_hash.to_string(),
        })
    }
}

/// Decoded contract-data entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractDataEntry {
    pub contract: String,
    pub key: ScVal,
    pub durability: Durability,
    pub val: ScVal,
}

/// Decoded contract-code entry; `code` is the module's bytes, hex-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractCodeEntry {
    pub hash: String,
    pub code: String,
}

/// Decoded value of one ledger storage slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerEntryData {
    ContractData(ContractDataEntry),
    ContractCode(ContractCodeEntry),
}

impl LedgerEntryData {
    /// Content hash of the module a contract-instance entry points at.
    ///
    /// `None` when the entry is not an instance slot, or when the instance
    /// runs a built-in executable with no uploaded module.
    pub fn wasm_hash(&self) -> Option<&str> {
        match self {
            Self::ContractData(entry) => match &entry.val {
                ScVal::ContractInstance(instance) => match &instance.executable {
                    ContractExecutable::Wasm(hash) => Some(hash),
                    ContractExecutable::StellarAsset => None,
                },
                _ => None,
            },
            Self::ContractCode(_) => None,
        }
    }
}
