//! # Soroscope Codec
//!
//! Typed descriptors for ledger keys, ledger entries, and contract values,
//! plus the adapter that translates them to and from the wire binary format
//! through an opaque, externally-provided XDR codec capability.
//!
//! The descriptors are closed, tagged unions: every variant carries exactly
//! the fields its wire form requires, so the codec boundary is total and
//! exhaustively checkable. The binary codec itself is out of scope here and
//! is injected as an [`XdrCodec`] trait object; its initialization is lazy
//! and memoized for the process lifetime.

pub mod error;

mod adapter;
mod ledger;
mod scval;

pub use adapter::{CodecAdapter, CodecFactory, XdrCodec};
pub use error::CodecError;
pub use ledger::{
    ContractCodeEntry, ContractDataEntry, Durability, LedgerEntryData, LedgerKey,
    LedgerKeyContractCode, LedgerKeyContractData,
};
pub use scval::{
    ContractExecutable, Int128Parts, ScContractInstance, ScMapEntry, ScMetaEntry, ScMetaV0, ScVal,
    UInt128Parts,
};
