//! Tag-indexed engine with atomic operations and stale-tolerant queries.
//!
//! # Design
//!
//! The primary store and the tag index disappear behind one lock: every
//! top-level operation acquires it exactly once, so callers see each
//! operation either fully applied or not applied at all. There is no state
//! in which a write updated the primary store but not the index.
//!
//! Expiration is passive. The index tolerates transient over-approximation
//! (orphan members after a key expires) but never under-approximation: a
//! live key is always discoverable through all of its tags. Reconciliation
//! via [`engine::TagVault::cleanup_tag`] repairs the drift.

pub mod engine;
pub mod index;
pub mod scan;
pub mod traits;

pub use engine::TagVault;
pub use index::TagIndex;
pub use scan::{scan_tags, ScanCursor, ScanPage};
pub use traits::TagStore;
