//! Merging of the evidence checks into one status record.

use std::sync::Arc;

use tracing::{debug, warn};

use soroscope_codec::CodecAdapter;
use soroscope_rpc::RpcClient;

use crate::attestation::AttestationLookup;
use crate::checks::EvidenceChecks;
use crate::config::StatusConfig;
use crate::error::StatusError;
use crate::status::ContractStatus;

/// Runs the evidence checks and merges them into a [`ContractStatus`].
///
/// Aggregation never fails as a whole: any check failure degrades that
/// field to `false`, and a failure to resolve the ledger height yields the
/// all-negative record. Re-running is idempotent and replaces the previous
/// status wholesale.
pub struct StatusAggregator {
    rpc: Arc<RpcClient>,
    checks: EvidenceChecks,
    config: StatusConfig,
}

impl StatusAggregator {
    /// Creates an aggregator over shared collaborators.
    pub fn new(
        rpc: Arc<RpcClient>,
        codec: Arc<CodecAdapter>,
        attestations: Arc<dyn AttestationLookup>,
        config: StatusConfig,
    ) -> Self {
        let checks = EvidenceChecks::new(
            Arc::clone(&rpc),
            codec,
            attestations,
            config.clone(),
        );
        Self {
            rpc,
            checks,
            config,
        }
    }

    /// Computes the consolidated status of one contract.
    ///
    /// The ledger height is resolved once and the derived starting-ledger
    /// bound is shared by every event-based check, so all six facts reason
    /// about the same time window. The checks have no ordering dependency
    /// and run concurrently.
    pub async fn full_status(&self, contract_id: &str) -> ContractStatus {
        let start_ledger = match self.start_ledger().await {
            Ok(bound) => bound,
            Err(error) => {
                warn!(contract_id, %error, "ledger height unavailable, reporting all facts negative");
                return ContractStatus::default();
            }
        };
        debug!(contract_id, start_ledger, "aggregating contract status");

        let (deployed, build_verified, minted, pair, liquidity, swapped) = tokio::join!(
            self.checks.deployed(contract_id),
            self.checks.build_verified(contract_id),
            self.checks.minted(contract_id, start_ledger),
            self.checks.soroswap_pair(contract_id, start_ledger),
            self.checks.soroswap_liquidity(contract_id, start_ledger),
            self.checks.soroswap_swapped(contract_id, start_ledger),
        );

        ContractStatus {
            deployed: or_negative("deployed", deployed),
            build_verified: or_negative("build_verified", build_verified),
            minted: or_negative("minted", minted),
            soroswap_pair: or_negative("soroswap_pair", pair),
            soroswap_liquidity: or_negative("soroswap_liquidity", liquidity),
            soroswap_swapped: or_negative("soroswap_swapped", swapped),
        }
    }

    /// Derives the starting-ledger bound for this run's lookback window.
    async fn start_ledger(&self) -> Result<u32, StatusError> {
        let latest = self.rpc.get_latest_ledger().await?;
        let bound = i64::from(latest.sequence) + self.config.start_ledger_offset;
        Ok(u32::try_from(bound.max(1)).unwrap_or(1))
    }
}

/// Collapses a check verdict to its field value, logging degradations.
fn or_negative(field: &'static str, verdict: Result<bool, StatusError>) -> bool {
    match verdict {
        Ok(value) => value,
        Err(error) => {
            warn!(field, %error, "evidence check failed, treating fact as negative");
            false
        }
    }
}
