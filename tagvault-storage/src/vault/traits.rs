//! Store seam for the tag-indexed engine.

use async_trait::async_trait;
use tagvault_core::VaultResult;

/// The tag-indexed operations plus the primary-store primitives callers
/// need for inspection.
///
/// # Atomicity
///
/// Every method is one atomic unit: other operations observe it either
/// fully applied or not applied at all. There is no state in which the
/// primary store was updated but the index was not, or vice versa.
///
/// # Staleness
///
/// Read-only methods are stale-tolerant: a key returned by
/// [`get_keys_by_tags`](TagStore::get_keys_by_tags) may have expired by the
/// time the caller reads it, and callers must treat the subsequent miss as
/// normal.
#[async_trait]
pub trait TagStore: Send + Sync {
    /// Store `value` under `key` with the given TTL and replace the key's
    /// tag associations with `tags`. Duplicate tag names are tolerated;
    /// tags are created lazily on first reference.
    async fn set_with_tags(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl_seconds: u64,
        tags: &[String],
    ) -> VaultResult<()>;

    /// Delete every key that is a member of all of `tags` and remove each
    /// deleted key from every tag that references it. Returns the number of
    /// keys that were live immediately before the call.
    async fn delete_by_tags(&self, tags: &[String]) -> VaultResult<u64>;

    /// Keys in the intersection of `tags`, without deleting anything.
    async fn get_keys_by_tags(&self, tags: &[String]) -> VaultResult<Vec<String>>;

    /// All tag names matching a glob pattern, complete regardless of
    /// namespace size, without duplicates.
    async fn get_tags(&self, pattern: &str) -> VaultResult<Vec<String>>;

    /// Remove stale members from a single tag, leaving live members and
    /// other tags untouched. Idempotent.
    async fn cleanup_tag(&self, tag: &str) -> VaultResult<()>;

    /// Read a value. Expired entries read as absent.
    async fn get(&self, key: &str) -> VaultResult<Option<Vec<u8>>>;

    /// Explicitly delete one key and its index traces. Returns whether a
    /// live entry was removed.
    async fn remove(&self, key: &str) -> VaultResult<bool>;

    /// Live primary keys matching a glob pattern.
    async fn keys(&self, pattern: &str) -> VaultResult<Vec<String>>;
}
