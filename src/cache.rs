//! Per-domain DNS record cache.
//!
//! Reads (`infoDnsRecords`) are far more frequent than writes during a
//! plan/apply cycle and the CCP API is rate limited, so the full record
//! list of each fetched domain is kept in memory. Any mutating call
//! removes the domain's entry before the request is sent; correctness
//! over staleness.

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::types::DnsRecord;

/// In-memory mapping from domain name to the record list last fetched for
/// that domain. Keys are case-sensitive, exactly as supplied by callers.
/// No TTL, no size bound; record lists are bounded by real-world zone
/// sizes and the cache lives only as long as one client instance.
#[derive(Debug, Default)]
pub(crate) struct RecordCache {
    entries: RwLock<HashMap<String, Vec<DnsRecord>>>,
}

impl RecordCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached record list for `domain`, if present.
    pub async fn get(&self, domain: &str) -> Option<Vec<DnsRecord>> {
        self.entries.read().await.get(domain).cloned()
    }

    /// Replaces the entry for `domain`, keeping the order returned by the
    /// remote system.
    pub async fn put(&self, domain: &str, records: Vec<DnsRecord>) {
        self.entries
            .write()
            .await
            .insert(domain.to_string(), records);
    }

    /// Removes the entry for `domain` unconditionally.
    pub async fn invalidate(&self, domain: &str) {
        self.entries.write().await.remove(domain);
    }
}
