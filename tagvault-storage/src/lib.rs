//! TagVault Storage - Tag-Indexed Expiring Key-Value Engine
//!
//! Maintains a secondary index (tag → member keys) over a primary store
//! whose entries expire asynchronously via TTL, keeping every mutating
//! operation atomic. The engine exposes five tag-indexed operations plus
//! the primary-store primitives needed for inspection:
//!
//! - [`TagVault::set_with_tags`] — atomic write with tag registration
//! - [`TagVault::delete_by_tags`] — intersection delete across tags
//! - [`TagVault::get_keys_by_tags`] — read-only intersection resolution
//! - [`TagVault::get_tags`] — cursored glob enumeration of the namespace
//! - [`TagVault::cleanup_tag`] — orphan reconciliation for a single tag
//!
//! The [`TagStore`] trait is the seam for alternative backends.

pub mod vault;

pub use vault::{scan_tags, ScanCursor, ScanPage, TagIndex, TagStore, TagVault};
