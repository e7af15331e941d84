//! The atomic tag-indexed engine.
//!
//! [`TagVault`] owns the primary entry map and the [`TagIndex`] behind a
//! single `RwLock`: mutating operations take the write lock once, queries
//! take the read lock once. That single acquisition is the serialization
//! point that makes every top-level call an atomic unit — validation
//! happens before the lock is taken, so a rejected call leaves no trace.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use tagvault_core::{
    Clock, Entry, GlobPattern, StoreError, SystemClock, ValidationError, VaultConfig, VaultResult,
};

use super::index::TagIndex;
use super::scan::{scan_tags, ScanCursor};
use super::traits::TagStore;

#[derive(Debug, Default)]
struct VaultState {
    entries: HashMap<String, Entry>,
    index: TagIndex,
}

/// In-memory tag-indexed expiring key-value store.
///
/// # Example
///
/// ```
/// use tagvault_storage::TagVault;
///
/// # async fn demo() -> tagvault_core::VaultResult<()> {
/// let vault = TagVault::new();
///
/// let tags = vec!["tag:users".to_string(), "tag:eu".to_string()];
/// vault.set_with_tags("user:42", b"payload".to_vec(), 60, &tags).await?;
///
/// let deleted = vault.delete_by_tags(&tags).await?;
/// assert_eq!(deleted, 1);
/// # Ok(())
/// # }
/// ```
pub struct TagVault {
    state: RwLock<VaultState>,
    clock: Arc<dyn Clock>,
    config: VaultConfig,
}

impl Default for TagVault {
    fn default() -> Self {
        Self::new()
    }
}

impl TagVault {
    /// Create a vault with the default configuration and the system clock.
    pub fn new() -> Self {
        Self::with_config(VaultConfig::default())
    }

    /// Create a vault with the given configuration and the system clock.
    pub fn with_config(config: VaultConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a vault with an injected clock. Tests use this with a
    /// [`ManualClock`](tagvault_core::ManualClock) to drive expiration
    /// deterministically.
    pub fn with_clock(config: VaultConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            state: RwLock::new(VaultState::default()),
            clock,
            config,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &VaultConfig {
        &self.config
    }

    /// Store `value` under `key` with the given TTL and replace the key's
    /// tag associations with `tags`.
    ///
    /// Tags are created lazily; duplicate names in the input collapse to
    /// one membership. If the key previously held different associations it
    /// is removed from every tag not in the new set.
    pub async fn set_with_tags(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl_seconds: u64,
        tags: &[String],
    ) -> VaultResult<()> {
        if ttl_seconds == 0 {
            return Err(ValidationError::ZeroTtl.into());
        }
        if tags.iter().any(|tag| tag.is_empty()) {
            return Err(ValidationError::EmptyTagName.into());
        }
        let tag_set: BTreeSet<String> = tags.iter().cloned().collect();

        let now = self.clock.now();
        let mut guard = self.state.write().await;
        let state = &mut *guard;

        if let Some(limit) = self.config.max_entries {
            let replacing_live = state
                .entries
                .get(key)
                .is_some_and(|entry| !entry.is_expired(now));
            if !replacing_live {
                let live = state
                    .entries
                    .values()
                    .filter(|entry| !entry.is_expired(now))
                    .count();
                if live >= limit {
                    return Err(StoreError::CapacityExceeded { limit }.into());
                }
            }
        }

        if let Some(old) = state.entries.get(key) {
            let superseded: Vec<String> = old.tags.difference(&tag_set).cloned().collect();
            for tag in &superseded {
                state.index.remove_member(tag, key);
            }
        }

        let entry = Entry::new(value, now, ttl_seconds, tag_set);
        for tag in &entry.tags {
            state.index.add_member(tag, key, entry.expires_at);
        }
        state.entries.insert(key.to_string(), entry);

        debug!(key, tag_count = tags.len(), ttl_seconds, "stored tagged entry");
        Ok(())
    }

    /// Delete every key that is a member of all of `tags`.
    ///
    /// Each deleted key is removed from every tag that references it, not
    /// only the queried tags. Orphans found in the intersection get their
    /// index traces cleared but do not count toward the result.
    pub async fn delete_by_tags(&self, tags: &[String]) -> VaultResult<u64> {
        if tags.is_empty() {
            return Err(ValidationError::NoTagsGiven.into());
        }

        let now = self.clock.now();
        let mut guard = self.state.write().await;
        let state = &mut *guard;

        let victims = state.index.intersection(tags);
        let mut deleted = 0u64;

        for key in &victims {
            match state.entries.remove(key) {
                Some(entry) => {
                    if !entry.is_expired(now) {
                        deleted += 1;
                    }
                    for tag in &entry.tags {
                        state.index.remove_member(tag, key);
                    }
                }
                None => {
                    // Index-only orphan: the primary entry is already gone,
                    // so clear the queried references.
                    for tag in tags {
                        state.index.remove_member(tag, key);
                    }
                }
            }
        }

        debug!(deleted, candidates = victims.len(), "deleted keys by tag intersection");
        Ok(deleted)
    }

    /// Keys in the intersection of `tags`, without deleting anything.
    ///
    /// Stale-tolerant: a returned key may already have expired. Results are
    /// sorted and duplicate-free.
    pub async fn get_keys_by_tags(&self, tags: &[String]) -> VaultResult<Vec<String>> {
        if tags.is_empty() {
            return Err(ValidationError::NoTagsGiven.into());
        }

        let guard = self.state.read().await;
        Ok(guard.index.intersection(tags).into_iter().collect())
    }

    /// All tag names matching a glob pattern.
    ///
    /// Pages through the namespace with a stable cursor until exhausted, so
    /// the result is complete regardless of namespace size.
    pub async fn get_tags(&self, pattern: &str) -> VaultResult<Vec<String>> {
        let pattern = GlobPattern::new(pattern)?;

        let guard = self.state.read().await;
        let mut matches: BTreeSet<String> = BTreeSet::new();
        let mut cursor: Option<ScanCursor> = None;
        loop {
            let page = scan_tags(&guard.index, cursor.as_ref(), self.config.scan_page_size);
            for name in page.names {
                if pattern.matches(&name) {
                    matches.insert(name);
                }
            }
            match page.next {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        Ok(matches.into_iter().collect())
    }

    /// Remove stale members from a single tag.
    ///
    /// A member is stale once its recorded deadline has passed; its expired
    /// primary entry (if still present) is purged along the way. Live
    /// members and other tags are untouched. When the tag empties, its
    /// index entry is dropped so enumeration stops reporting it. Invoking
    /// this on an already-clean tag changes nothing.
    pub async fn cleanup_tag(&self, tag: &str) -> VaultResult<()> {
        let now = self.clock.now();
        let mut guard = self.state.write().await;
        let state = &mut *guard;

        let members: Vec<(String, tagvault_core::Timestamp)> = match state.index.members(tag) {
            Some(members) => members
                .iter()
                .map(|(key, deadline)| (key.clone(), *deadline))
                .collect(),
            None => return Ok(()),
        };

        let mut removed = 0usize;
        for (key, deadline) in members {
            if deadline > now {
                continue;
            }
            match state.entries.get(&key) {
                // A live entry is never evicted here, even if the recorded
                // deadline lags behind a rewrite.
                Some(entry) if !entry.is_expired(now) => continue,
                Some(_) => {
                    state.entries.remove(&key);
                }
                None => {}
            }
            state.index.remove_member(tag, &key);
            removed += 1;
        }

        debug!(tag, removed, "reconciled tag members");
        Ok(())
    }

    /// Read a value. Expired entries read as absent.
    pub async fn get(&self, key: &str) -> VaultResult<Option<Vec<u8>>> {
        let now = self.clock.now();
        let guard = self.state.read().await;
        Ok(guard
            .entries
            .get(key)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.value.clone()))
    }

    /// Explicitly delete one key and its index traces.
    ///
    /// Returns whether a live entry was removed; deleting a missing or
    /// already-expired key is a normal `false`, never an error.
    pub async fn remove(&self, key: &str) -> VaultResult<bool> {
        let now = self.clock.now();
        let mut guard = self.state.write().await;
        let state = &mut *guard;

        match state.entries.remove(key) {
            Some(entry) => {
                for tag in &entry.tags {
                    state.index.remove_member(tag, key);
                }
                Ok(!entry.is_expired(now))
            }
            None => Ok(false),
        }
    }

    /// Live primary keys matching a glob pattern, sorted.
    pub async fn keys(&self, pattern: &str) -> VaultResult<Vec<String>> {
        let pattern = GlobPattern::new(pattern)?;
        let now = self.clock.now();

        let guard = self.state.read().await;
        let mut keys: Vec<String> = guard
            .entries
            .iter()
            .filter(|(key, entry)| !entry.is_expired(now) && pattern.matches(key))
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort();
        Ok(keys)
    }

    /// Drop all entries and index state.
    pub async fn clear(&self) {
        let mut guard = self.state.write().await;
        guard.entries.clear();
        guard.index.clear();
    }

    /// Number of live entries.
    pub async fn entry_count(&self) -> usize {
        let now = self.clock.now();
        let guard = self.state.read().await;
        guard
            .entries
            .values()
            .filter(|entry| !entry.is_expired(now))
            .count()
    }

    /// Number of tags in the index, stale members included.
    pub async fn tag_count(&self) -> usize {
        let guard = self.state.read().await;
        guard.index.tag_count()
    }
}

#[async_trait]
impl TagStore for TagVault {
    async fn set_with_tags(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl_seconds: u64,
        tags: &[String],
    ) -> VaultResult<()> {
        TagVault::set_with_tags(self, key, value, ttl_seconds, tags).await
    }

    async fn delete_by_tags(&self, tags: &[String]) -> VaultResult<u64> {
        TagVault::delete_by_tags(self, tags).await
    }

    async fn get_keys_by_tags(&self, tags: &[String]) -> VaultResult<Vec<String>> {
        TagVault::get_keys_by_tags(self, tags).await
    }

    async fn get_tags(&self, pattern: &str) -> VaultResult<Vec<String>> {
        TagVault::get_tags(self, pattern).await
    }

    async fn cleanup_tag(&self, tag: &str) -> VaultResult<()> {
        TagVault::cleanup_tag(self, tag).await
    }

    async fn get(&self, key: &str) -> VaultResult<Option<Vec<u8>>> {
        TagVault::get(self, key).await
    }

    async fn remove(&self, key: &str) -> VaultResult<bool> {
        TagVault::remove(self, key).await
    }

    async fn keys(&self, pattern: &str) -> VaultResult<Vec<String>> {
        TagVault::keys(self, pattern).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tagvault_core::{ManualClock, VaultError};

    fn tags(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    fn vault_with_manual_clock() -> (TagVault, ManualClock) {
        let clock = ManualClock::starting_now();
        let vault = TagVault::with_clock(VaultConfig::default(), Arc::new(clock.clone()));
        (vault, clock)
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let vault = TagVault::new();
        vault
            .set_with_tags("key-1", b"value".to_vec(), 60, &tags(&["tag:1"]))
            .await
            .expect("set should succeed");

        let value = vault.get("key-1").await.expect("get should succeed");
        assert_eq!(value, Some(b"value".to_vec()));
    }

    #[tokio::test]
    async fn test_zero_ttl_rejected() {
        let vault = TagVault::new();
        let err = vault
            .set_with_tags("key-1", b"value".to_vec(), 0, &tags(&["tag:1"]))
            .await
            .expect_err("zero TTL should be rejected");
        assert_eq!(err, VaultError::Validation(ValidationError::ZeroTtl));

        assert_eq!(vault.entry_count().await, 0);
        assert_eq!(vault.tag_count().await, 0);
    }

    #[tokio::test]
    async fn test_empty_tag_name_rejected() {
        let vault = TagVault::new();
        let err = vault
            .set_with_tags("key-1", b"value".to_vec(), 60, &tags(&["tag:1", ""]))
            .await
            .expect_err("empty tag name should be rejected");
        assert_eq!(err, VaultError::Validation(ValidationError::EmptyTagName));
        assert_eq!(vault.tag_count().await, 0);
    }

    #[tokio::test]
    async fn test_maximal_ttl_is_accepted() {
        let vault = TagVault::new();
        vault
            .set_with_tags("key-1", b"value".to_vec(), u64::MAX, &tags(&["tag:1"]))
            .await
            .expect("maximal TTL should succeed");

        assert!(vault.get("key-1").await.expect("get should succeed").is_some());
    }

    #[tokio::test]
    async fn test_untagged_write_is_allowed() {
        let vault = TagVault::new();
        vault
            .set_with_tags("key-1", b"value".to_vec(), 60, &[])
            .await
            .expect("untagged set should succeed");

        assert_eq!(vault.entry_count().await, 1);
        assert_eq!(vault.tag_count().await, 0);
    }

    #[tokio::test]
    async fn test_duplicate_tags_collapse() {
        let vault = TagVault::new();
        vault
            .set_with_tags("key-1", b"value".to_vec(), 60, &tags(&["tag:1", "tag:1"]))
            .await
            .expect("set should succeed");

        assert_eq!(vault.tag_count().await, 1);
        let keys = vault
            .get_keys_by_tags(&tags(&["tag:1"]))
            .await
            .expect("query should succeed");
        assert_eq!(keys, vec!["key-1".to_string()]);
    }

    #[tokio::test]
    async fn test_rewrite_replaces_tag_associations() {
        let vault = TagVault::new();
        vault
            .set_with_tags("key-1", b"v1".to_vec(), 60, &tags(&["tag:a", "tag:b"]))
            .await
            .expect("set should succeed");
        vault
            .set_with_tags("key-1", b"v2".to_vec(), 60, &tags(&["tag:b", "tag:c"]))
            .await
            .expect("rewrite should succeed");

        let by_a = vault.get_keys_by_tags(&tags(&["tag:a"])).await;
        assert_eq!(by_a.expect("query should succeed"), Vec::<String>::new());
        assert_eq!(vault.tag_count().await, 2, "tag:a should be dropped once empty");

        for tag in ["tag:b", "tag:c"] {
            let keys = vault
                .get_keys_by_tags(&tags(&[tag]))
                .await
                .expect("query should succeed");
            assert_eq!(keys, vec!["key-1".to_string()], "missing under {tag}");
        }

        assert_eq!(vault.get("key-1").await.expect("get should succeed"), Some(b"v2".to_vec()));
    }

    #[tokio::test]
    async fn test_delete_by_tags_requires_tags() {
        let vault = TagVault::new();
        let err = vault
            .delete_by_tags(&[])
            .await
            .expect_err("zero tags should be rejected");
        assert_eq!(err, VaultError::Validation(ValidationError::NoTagsGiven));
    }

    #[tokio::test]
    async fn test_get_keys_by_tags_requires_tags() {
        let vault = TagVault::new();
        let err = vault
            .get_keys_by_tags(&[])
            .await
            .expect_err("zero tags should be rejected");
        assert_eq!(err, VaultError::Validation(ValidationError::NoTagsGiven));
    }

    #[tokio::test]
    async fn test_delete_by_tags_uses_intersection() {
        let vault = TagVault::new();
        vault
            .set_with_tags("key-ab", b"v".to_vec(), 60, &tags(&["tag:a", "tag:b"]))
            .await
            .expect("set should succeed");
        vault
            .set_with_tags("key-a", b"v".to_vec(), 60, &tags(&["tag:a"]))
            .await
            .expect("set should succeed");

        let deleted = vault
            .delete_by_tags(&tags(&["tag:a", "tag:b"]))
            .await
            .expect("delete should succeed");
        assert_eq!(deleted, 1);

        assert!(vault.get("key-ab").await.expect("get should succeed").is_none());
        assert!(vault.get("key-a").await.expect("get should succeed").is_some());
    }

    #[tokio::test]
    async fn test_delete_removes_key_from_unqueried_tags() {
        let vault = TagVault::new();
        vault
            .set_with_tags("key-1", b"v".to_vec(), 60, &tags(&["tag:a", "tag:b", "tag:c"]))
            .await
            .expect("set should succeed");

        let deleted = vault
            .delete_by_tags(&tags(&["tag:a"]))
            .await
            .expect("delete should succeed");
        assert_eq!(deleted, 1);

        // tag:c was never queried but must not retain the dead reference.
        let by_c = vault.get_keys_by_tags(&tags(&["tag:c"])).await;
        assert_eq!(by_c.expect("query should succeed"), Vec::<String>::new());
        assert_eq!(vault.tag_count().await, 0);
    }

    #[tokio::test]
    async fn test_expired_intersection_member_does_not_count() {
        let (vault, clock) = vault_with_manual_clock();
        vault
            .set_with_tags("key-1", b"v".to_vec(), 1, &tags(&["tag:a"]))
            .await
            .expect("set should succeed");

        clock.advance_secs(2);

        let deleted = vault
            .delete_by_tags(&tags(&["tag:a"]))
            .await
            .expect("delete should succeed");
        assert_eq!(deleted, 0, "expired member is an index cleanup, not a delete");
        assert_eq!(vault.tag_count().await, 0);
    }

    #[tokio::test]
    async fn test_get_is_expiry_aware() {
        let (vault, clock) = vault_with_manual_clock();
        vault
            .set_with_tags("key-1", b"v".to_vec(), 1, &tags(&["tag:a"]))
            .await
            .expect("set should succeed");

        assert!(vault.get("key-1").await.expect("get should succeed").is_some());
        clock.advance_secs(1);
        assert!(vault.get("key-1").await.expect("get should succeed").is_none());
    }

    #[tokio::test]
    async fn test_cleanup_removes_only_stale_members() {
        let (vault, clock) = vault_with_manual_clock();
        vault
            .set_with_tags("key-old", b"v".to_vec(), 1, &tags(&["tag:a"]))
            .await
            .expect("set should succeed");
        clock.advance_secs(2);
        vault
            .set_with_tags("key-new", b"v".to_vec(), 60, &tags(&["tag:a"]))
            .await
            .expect("set should succeed");

        vault.cleanup_tag("tag:a").await.expect("cleanup should succeed");

        let keys = vault
            .get_keys_by_tags(&tags(&["tag:a"]))
            .await
            .expect("query should succeed");
        assert_eq!(keys, vec!["key-new".to_string()]);
        assert_eq!(vault.entry_count().await, 1);
    }

    #[tokio::test]
    async fn test_cleanup_drops_emptied_tag() {
        let (vault, clock) = vault_with_manual_clock();
        vault
            .set_with_tags("key-1", b"v".to_vec(), 1, &tags(&["tag:a"]))
            .await
            .expect("set should succeed");
        clock.advance_secs(2);

        vault.cleanup_tag("tag:a").await.expect("cleanup should succeed");

        let names = vault.get_tags("*").await.expect("enumeration should succeed");
        assert!(names.is_empty(), "emptied tag should not be enumerable");
    }

    #[tokio::test]
    async fn test_cleanup_is_idempotent() {
        let (vault, clock) = vault_with_manual_clock();
        vault
            .set_with_tags("key-1", b"v".to_vec(), 1, &tags(&["tag:a"]))
            .await
            .expect("set should succeed");
        vault
            .set_with_tags("key-2", b"v".to_vec(), 60, &tags(&["tag:a"]))
            .await
            .expect("set should succeed");
        clock.advance_secs(2);

        vault.cleanup_tag("tag:a").await.expect("first cleanup should succeed");
        let after_first = vault
            .get_keys_by_tags(&tags(&["tag:a"]))
            .await
            .expect("query should succeed");

        vault.cleanup_tag("tag:a").await.expect("second cleanup should succeed");
        let after_second = vault
            .get_keys_by_tags(&tags(&["tag:a"]))
            .await
            .expect("query should succeed");

        assert_eq!(after_first, after_second);
        assert_eq!(after_first, vec!["key-2".to_string()]);
    }

    #[tokio::test]
    async fn test_cleanup_missing_tag_is_noop() {
        let vault = TagVault::new();
        vault
            .cleanup_tag("tag:absent")
            .await
            .expect("cleanup of a missing tag should succeed");
    }

    #[tokio::test]
    async fn test_cleanup_leaves_other_tags_alone() {
        let (vault, clock) = vault_with_manual_clock();
        vault
            .set_with_tags("key-1", b"v".to_vec(), 1, &tags(&["tag:a", "tag:b"]))
            .await
            .expect("set should succeed");
        clock.advance_secs(2);

        vault.cleanup_tag("tag:a").await.expect("cleanup should succeed");

        // tag:b still carries the orphan until its own reconciliation runs.
        let stale = vault
            .get_keys_by_tags(&tags(&["tag:b"]))
            .await
            .expect("query should succeed");
        assert_eq!(stale, vec!["key-1".to_string()]);

        vault.cleanup_tag("tag:b").await.expect("cleanup should succeed");
        assert_eq!(vault.tag_count().await, 0);
    }

    #[tokio::test]
    async fn test_get_tags_pages_through_namespace() {
        let vault = TagVault::with_config(VaultConfig::default().with_scan_page_size(2));
        let names = tags(&["tag:1", "tag:2", "tag:3", "tag:4", "tag:5", "tag:6", "tag:7"]);
        vault
            .set_with_tags("key-1", b"v".to_vec(), 60, &names)
            .await
            .expect("set should succeed");

        let found = vault.get_tags("tag:*").await.expect("enumeration should succeed");
        assert_eq!(found.len(), 7);
    }

    #[tokio::test]
    async fn test_get_tags_filters_by_pattern() {
        let vault = TagVault::new();
        vault
            .set_with_tags(
                "key-1",
                b"v".to_vec(),
                60,
                &tags(&["tag:users", "tag:orders", "other:1"]),
            )
            .await
            .expect("set should succeed");

        let found = vault.get_tags("tag:*").await.expect("enumeration should succeed");
        assert_eq!(found, vec!["tag:orders".to_string(), "tag:users".to_string()]);
    }

    #[tokio::test]
    async fn test_get_tags_rejects_bad_pattern() {
        let vault = TagVault::new();
        let err = vault
            .get_tags("tag:[")
            .await
            .expect_err("malformed pattern should be rejected");
        assert!(matches!(
            err,
            VaultError::Validation(ValidationError::InvalidPattern { .. })
        ));
    }

    #[tokio::test]
    async fn test_capacity_limit_rejects_and_preserves_state() {
        let vault = TagVault::with_config(VaultConfig::default().with_max_entries(2));
        vault
            .set_with_tags("key-1", b"v".to_vec(), 60, &tags(&["tag:a"]))
            .await
            .expect("set should succeed");
        vault
            .set_with_tags("key-2", b"v".to_vec(), 60, &tags(&["tag:a"]))
            .await
            .expect("set should succeed");

        let err = vault
            .set_with_tags("key-3", b"v".to_vec(), 60, &tags(&["tag:a", "tag:b"]))
            .await
            .expect_err("third insert should hit the capacity limit");
        assert_eq!(
            err,
            VaultError::Store(StoreError::CapacityExceeded { limit: 2 })
        );

        assert_eq!(vault.entry_count().await, 2);
        let names = vault.get_tags("*").await.expect("enumeration should succeed");
        assert!(
            !names.contains(&"tag:b".to_string()),
            "rejected write must leave no index trace"
        );
    }

    #[tokio::test]
    async fn test_capacity_limit_allows_overwrites() {
        let vault = TagVault::with_config(VaultConfig::default().with_max_entries(1));
        vault
            .set_with_tags("key-1", b"v1".to_vec(), 60, &tags(&["tag:a"]))
            .await
            .expect("set should succeed");
        vault
            .set_with_tags("key-1", b"v2".to_vec(), 60, &tags(&["tag:b"]))
            .await
            .expect("overwrite should not hit the capacity limit");

        assert_eq!(vault.get("key-1").await.expect("get should succeed"), Some(b"v2".to_vec()));
    }

    #[tokio::test]
    async fn test_remove_cleans_index() {
        let vault = TagVault::new();
        vault
            .set_with_tags("key-1", b"v".to_vec(), 60, &tags(&["tag:a", "tag:b"]))
            .await
            .expect("set should succeed");

        assert!(vault.remove("key-1").await.expect("remove should succeed"));
        assert_eq!(vault.tag_count().await, 0);
        assert!(!vault.remove("key-1").await.expect("second remove should succeed"));
    }

    #[tokio::test]
    async fn test_keys_filters_live_entries() {
        let (vault, clock) = vault_with_manual_clock();
        vault
            .set_with_tags("key-live", b"v".to_vec(), 60, &[])
            .await
            .expect("set should succeed");
        vault
            .set_with_tags("key-dying", b"v".to_vec(), 1, &[])
            .await
            .expect("set should succeed");
        clock.advance_secs(2);

        let keys = vault.keys("key-*").await.expect("keys should succeed");
        assert_eq!(keys, vec!["key-live".to_string()]);
    }

    #[tokio::test]
    async fn test_clear_empties_everything() {
        let vault = TagVault::new();
        vault
            .set_with_tags("key-1", b"v".to_vec(), 60, &tags(&["tag:a"]))
            .await
            .expect("set should succeed");

        vault.clear().await;
        assert_eq!(vault.entry_count().await, 0);
        assert_eq!(vault.tag_count().await, 0);
    }

    #[tokio::test]
    async fn test_trait_object_dispatch() {
        let vault: Arc<dyn TagStore> = Arc::new(TagVault::new());
        vault
            .set_with_tags("key-1", b"v".to_vec(), 60, &tags(&["tag:a"]))
            .await
            .expect("set should succeed");

        let keys = vault
            .get_keys_by_tags(&tags(&["tag:a"]))
            .await
            .expect("query should succeed");
        assert_eq!(keys, vec!["key-1".to_string()]);
    }
}
