//! Configuration types

use serde::{Deserialize, Serialize};

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultConfig {
    /// Page size for cursored scans of the tag namespace.
    pub scan_page_size: usize,
    /// Optional cap on live entries. `None` means unbounded.
    pub max_entries: Option<usize>,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            scan_page_size: 100,
            max_entries: None,
        }
    }
}

impl VaultConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scan page size. Values below 1 are clamped to 1.
    pub fn with_scan_page_size(mut self, size: usize) -> Self {
        self.scan_page_size = size.max(1);
        self
    }

    /// Set the live-entry capacity limit.
    pub fn with_max_entries(mut self, max: usize) -> Self {
        self.max_entries = Some(max);
        self
    }
}
