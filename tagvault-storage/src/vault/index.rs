//! Secondary index: tag name → member keys with expiration bookkeeping.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::Bound;

use tagvault_core::Timestamp;

/// Tag → (member key → recorded deadline).
///
/// The per-member deadline mirrors the primary entry's expiry at write time,
/// so stale members can be recognized without a primary-store lookup. The
/// index may transiently over-approximate membership after a key expires,
/// but a live key is always present under every one of its tags.
///
/// Tags are created lazily on first reference and removed when their last
/// member is removed, so enumeration never reports phantom empty tags.
#[derive(Debug, Default)]
pub struct TagIndex {
    tags: BTreeMap<String, BTreeMap<String, Timestamp>>,
}

impl TagIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tags currently present, stale members included.
    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }

    /// Whether a tag currently exists in the index.
    pub fn contains_tag(&self, tag: &str) -> bool {
        self.tags.contains_key(tag)
    }

    /// Member keys of a tag with their recorded deadlines.
    pub fn members(&self, tag: &str) -> Option<&BTreeMap<String, Timestamp>> {
        self.tags.get(tag)
    }

    /// Add `key` to `tag`, creating the tag lazily.
    ///
    /// Re-adding an existing member refreshes its recorded deadline, which
    /// keeps the bookkeeping current across overwrites.
    pub fn add_member(&mut self, tag: &str, key: &str, deadline: Timestamp) {
        self.tags
            .entry(tag.to_string())
            .or_default()
            .insert(key.to_string(), deadline);
    }

    /// Remove `key` from `tag`, dropping the tag entry when it empties.
    ///
    /// Returns whether the member was present.
    pub fn remove_member(&mut self, tag: &str, key: &str) -> bool {
        let Some(members) = self.tags.get_mut(tag) else {
            return false;
        };
        let removed = members.remove(key).is_some();
        if members.is_empty() {
            self.tags.remove(tag);
        }
        removed
    }

    /// Keys present in every one of `tags`.
    ///
    /// Seeds from the smallest member set and probes the rest. A tag with
    /// no index entry short-circuits to the empty set. Callers reject an
    /// empty `tags` input before reaching here; it also yields the empty
    /// set, never "all keys".
    pub fn intersection<S: AsRef<str>>(&self, tags: &[S]) -> BTreeSet<String> {
        let mut sets: Vec<&BTreeMap<String, Timestamp>> = Vec::with_capacity(tags.len());
        for tag in tags {
            match self.tags.get(tag.as_ref()) {
                Some(members) => sets.push(members),
                None => return BTreeSet::new(),
            }
        }

        let Some((seed_pos, seed)) = sets
            .iter()
            .enumerate()
            .min_by_key(|(_, members)| members.len())
            .map(|(pos, members)| (pos, *members))
        else {
            return BTreeSet::new();
        };

        seed.keys()
            .filter(|key| {
                sets.iter()
                    .enumerate()
                    .all(|(pos, members)| pos == seed_pos || members.contains_key(key.as_str()))
            })
            .cloned()
            .collect()
    }

    /// Tag names in lexicographic order, strictly after the given bound.
    pub fn names_after<'a>(&'a self, after: Option<&'a str>) -> impl Iterator<Item = &'a str> + 'a {
        let lower: Bound<&str> = match after {
            Some(bound) => Bound::Excluded(bound),
            None => Bound::Unbounded,
        };
        self.tags
            .range::<str, _>((lower, Bound::Unbounded))
            .map(|(name, _)| name.as_str())
    }

    /// Drop all index state.
    pub fn clear(&mut self) {
        self.tags.clear();
    }
}
