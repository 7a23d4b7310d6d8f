//! Tagged contract-value union and contract metadata entries.

use serde::{Deserialize, Serialize};

/// High/low halves of an unsigned 128-bit value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UInt128Parts {
    pub hi: u64,
    pub lo: u64,
}

/// High/low halves of a signed 128-bit value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Int128Parts {
    pub hi: i64,
    pub lo: u64,
}

/// One key/value pair of a contract-value map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScMapEntry {
    pub key: ScVal,
    pub val: ScVal,
}

/// Executable reference of a contract instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractExecutable {
    /// Uploaded module, referenced by content hash (hex).
    Wasm(String),
    /// Built-in asset contract; no module on the ledger.
    StellarAsset,
}

/// Decoded contract-instance value stored under the instance key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScContractInstance {
    pub executable: ContractExecutable,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<Vec<ScMapEntry>>,
}

/// Tagged contract-value union.
///
/// Exactly the variants this engine consumes or emits; the JSON form is the
/// codec capability's convention (externally tagged, snake_case variant
/// names, unit variants as bare strings).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScVal {
    Bool(bool),
    U32(u32),
    I32(i32),
    U64(u64),
    I64(i64),
    U128(UInt128Parts),
    I128(Int128Parts),
    Symbol(String),
    String(String),
    Address(String),
    /// Opaque byte payload, hex-encoded.
    Bytes(String),
    Vec(Vec<ScVal>),
    Map(Vec<ScMapEntry>),
    /// Key marker for the contract-instance storage slot.
    LedgerKeyContractInstance,
    ContractInstance(ScContractInstance),
}

impl ScVal {
    /// Symbol payload, if this value is a symbol.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Symbol(s) => Some(s),
            _ => None,
        }
    }

    /// Address payload, if this value is an address.
    pub fn as_address(&self) -> Option<&str> {
        match self {
            Self::Address(a) => Some(a),
            _ => None,
        }
    }

    /// Map entries, if this value is a map.
    pub fn as_map(&self) -> Option<&[ScMapEntry]> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Vector elements, if this value is a vector.
    pub fn as_vec(&self) -> Option<&[ScVal]> {
        match self {
            Self::Vec(elements) => Some(elements),
            _ => None,
        }
    }
}

/// One entry of a contract's metadata section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScMetaEntry {
    ScMetaV0(ScMetaV0),
}

/// Key/value metadata record embedded in the compiled module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScMetaV0 {
    pub key: String,
    pub val: String,
}
