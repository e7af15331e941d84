//! Error types for TagVault operations

use thiserror::Error;

/// Deterministic input rejection.
///
/// These never depend on store state: the same input is rejected the same
/// way every time, before any mutation happens.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("TTL must be greater than zero")]
    ZeroTtl,

    #[error("At least one tag is required for an intersection operation")]
    NoTagsGiven,

    #[error("Tag names must be non-empty")]
    EmptyTagName,

    #[error("Invalid glob pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

/// Underlying-store failures, surfaced to the caller unmodified.
///
/// The engine performs no retries; empty results are never represented
/// here.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Entry capacity exceeded: limit {limit}")]
    CapacityExceeded { limit: usize },

    #[error("Backend failure: {reason}")]
    Backend { reason: String },
}

/// Master error type for all TagVault errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VaultError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type alias for TagVault operations.
pub type VaultResult<T> = Result<T, VaultError>;
