//! Search helpers shared by the API layer and the graph builder.
//!
//! This module lives in `core` (zero internal deps) so it can be used by both
//! the API/repository layer and the visualization model.
//!
//! The search contract is pinned here: matching is a case-insensitive
//! substring test over the searchable fields of a record, and an empty or
//! whitespace-only query matches nothing. Database-side search uses `ILIKE`
//! with the same semantics.

use std::sync::atomic::{AtomicU64, Ordering};

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Default number of results per page.
pub const DEFAULT_SEARCH_LIMIT: i64 = 50;

/// Maximum number of results per page.
pub const MAX_SEARCH_LIMIT: i64 = 200;

// ---------------------------------------------------------------------------
// Query normalization & matching
// ---------------------------------------------------------------------------

/// Normalize a raw user query: trim whitespace and lowercase.
///
/// Returns `None` for empty or whitespace-only input. Callers treat `None`
/// as "no active search" -- list endpoints return an empty result set and
/// the graph builder skips search filtering entirely.
pub fn normalize_query(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Case-insensitive substring match of a normalized query against a set of
/// optional fields.
///
/// `query` must already be the output of [`normalize_query`].
pub fn matches_query(query: &str, fields: &[Option<&str>]) -> bool {
    fields
        .iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(query))
}

/// Escape `%` and `_` in a query destined for a SQL `ILIKE` pattern.
pub fn escape_like(query: &str) -> String {
    query.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

// ---------------------------------------------------------------------------
// Generation guard
// ---------------------------------------------------------------------------

/// Monotonic generation counter guarding against out-of-order search results.
///
/// Every issued search takes a ticket via [`SearchGeneration::begin`]; when a
/// response arrives, the caller applies it only if [`SearchGeneration::is_current`]
/// still holds for that ticket. A slow early response that lands after a
/// later request is therefore discarded instead of clobbering newer results.
#[derive(Debug, Default)]
pub struct SearchGeneration {
    latest: AtomicU64,
}

impl SearchGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new search, invalidating all earlier tickets.
    pub fn begin(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether `ticket` is still the most recently issued generation.
    pub fn is_current(&self, ticket: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
