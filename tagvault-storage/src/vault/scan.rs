//! Stable cursor over the tag namespace.
//!
//! Tag enumeration must return complete results at thousands of tags, so
//! the engine pages through the namespace instead of assuming one bounded
//! call suffices. The cursor is the last name already returned; the index's
//! ordered storage makes it stable across pages even when tags are inserted
//! or removed between them.

use super::index::TagIndex;

/// Opaque resume point for a namespace scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanCursor(pub(crate) String);

/// One page of tag names plus the cursor for the next page.
#[derive(Debug, Clone)]
pub struct ScanPage {
    /// Tag names in this page, in lexicographic order.
    pub names: Vec<String>,
    /// Cursor to resume from, or `None` when the namespace is exhausted.
    pub next: Option<ScanCursor>,
}

/// Fetch up to `page_size` tag names following `cursor`.
///
/// A full page yields a `next` cursor even when it happens to be the final
/// page; the following call then returns an empty, cursor-less page.
pub fn scan_tags(index: &TagIndex, cursor: Option<&ScanCursor>, page_size: usize) -> ScanPage {
    let page_size = page_size.max(1);
    let after = cursor.map(|c| c.0.as_str());

    let names: Vec<String> = index
        .names_after(after)
        .take(page_size)
        .map(str::to_string)
        .collect();

    let next = if names.len() == page_size {
        names.last().cloned().map(ScanCursor)
    } else {
        None
    };

    ScanPage { names, next }
}
