//! TagVault Core - Shared Data Types
//!
//! Pure data structures with no engine behavior. The storage engine and any
//! alternative backend depend on this crate; it contains ONLY data types,
//! error definitions, and the small cross-cutting abstractions (glob
//! patterns, clock) the engine composes.

pub mod clock;
pub mod config;
pub mod entry;
pub mod error;
pub mod pattern;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::VaultConfig;
pub use entry::Entry;
pub use error::{StoreError, ValidationError, VaultError, VaultResult};
pub use pattern::GlobPattern;

/// Timestamp type using UTC timezone.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Time-to-live in whole seconds. Zero is invalid everywhere it appears.
pub type TtlSeconds = u64;
