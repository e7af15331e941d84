//! Primary-store entry record.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::{Timestamp, TtlSeconds};

/// A stored value with its expiry deadline and current tag memberships.
///
/// Expiration is lazy: an entry past its deadline reads as absent
/// everywhere, and is physically purged by the next mutating operation that
/// touches it. The entry carries its own tag set so an overwrite can remove
/// the key from superseded tags without scanning the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Opaque value payload.
    pub value: Vec<u8>,
    /// Absolute deadline after which the entry no longer exists.
    pub expires_at: Timestamp,
    /// Tags this key currently belongs to.
    pub tags: BTreeSet<String>,
}

impl Entry {
    /// Build an entry written at `written_at` with a required TTL.
    ///
    /// Callers validate `ttl_seconds > 0` before reaching this point. A TTL
    /// too large to represent saturates the deadline to the maximum
    /// timestamp, which is never reached.
    pub fn new(
        value: Vec<u8>,
        written_at: Timestamp,
        ttl_seconds: TtlSeconds,
        tags: BTreeSet<String>,
    ) -> Self {
        let expires_at = i64::try_from(ttl_seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|ttl| written_at.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self {
            value,
            expires_at,
            tags,
        }
    }

    /// Whether the entry has reached its deadline as of `now`.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.expires_at <= now
    }
}
