//! Process-scoped cache of attestation registry responses.

use std::collections::HashMap;

use bytes::Bytes;
use tokio::sync::RwLock;

/// One stored upstream response.
#[derive(Debug, Clone)]
pub struct CachedResponse {
    /// Upstream HTTP status code.
    pub status: u16,
    /// Upstream body, verbatim.
    pub body: Bytes,
    /// Passthrough headers, in upstream order.
    pub headers: Vec<(String, String)>,
}

/// Memoization store for attestation lookups, keyed by the literal
/// constructed upstream URL.
///
/// Entries are never evicted, never expire, and are never retried: whatever
/// the upstream returned first — success or error — is what every later
/// request for the same URL sees. Growth is bounded only by the set of
/// distinct lookups, which this deployment keeps small; [`len`] is exposed
/// so an eviction layer could be added without reshaping the API.
///
/// [`len`]: AttestationCache::len
#[derive(Debug, Default)]
pub struct AttestationCache {
    entries: RwLock<HashMap<String, CachedResponse>>,
}

impl AttestationCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored response for `url`, if any.
    pub async fn get(&self, url: &str) -> Option<CachedResponse> {
        self.entries.read().await.get(url).cloned()
    }

    /// Stores `response` under `url` unless an entry already exists, and
    /// returns the entry that ended up stored.
    ///
    /// First call wins: when two fetches race, the loser's response is
    /// discarded in favor of whatever was stored first.
    pub async fn insert_first(&self, url: &str, response: CachedResponse) -> CachedResponse {
        let mut entries = self.entries.write().await;
        entries
            .entry(url.to_string())
            .or_insert(response)
            .clone()
    }

    /// Number of cached lookups.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the cache is empty.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
