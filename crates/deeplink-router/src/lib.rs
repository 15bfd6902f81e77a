//! # Deeplink Router
//!
//! Route matching for hash-fragment navigation with support for:
//! - Literal segments (`user/settings`)
//! - Named parameters (`user/:id`)
//! - Positional wildcards (`*`, and the flagged `+` variant)
//! - Pinned segments (`@admin` must match but captures nothing)
//! - Optional parameters (`;tab`) and optional literals (`|archive`)
//! - Query-string constraints (`search?q=:term`, `list?|page=1`)
//!
//! ## Matching Model
//!
//! Patterns are parsed **once** into a typed segment list; the matcher never
//! re-derives meaning from sigil characters at match time. Matching itself is
//! a pure function: `Pattern::captures()` maps a raw path to
//! `Option<CaptureMap>` with no shared state and no speculative mutation.
//! `None` means "did not match"; `Some` with an empty map is a real match
//! that simply captured nothing; callers must keep the two distinct.
//!
//! ## Path Normalization
//!
//! A raw path may carry a leading `#`, leading and trailing slashes, and a
//! `?query` suffix. Patterns and paths are only compared after both are
//! slash-trimmed and their query strings are split off separately.
//!
//! ## Example
//!
//! ```
//! use deeplink_router::{MatchOptions, Pattern};
//!
//! let pattern = Pattern::parse("user/:id");
//! let caps = pattern.captures("#/user/42", MatchOptions::default()).unwrap();
//! assert_eq!(caps.get("id"), Some("42"));
//!
//! // A literal mismatch is no match at all, not an empty capture set.
//! assert!(pattern.captures("#/group/42", MatchOptions::default()).is_none());
//! ```

use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// Module Declarations
// ============================================================================

pub mod path;
pub mod route;

pub use path::query::QueryMap;
pub use path::{absolute_path, segments, split_query, trim_path, trim_path_keep_query};
pub use route::matcher::{match_all, MatchOptions};
pub use route::parser::{Pattern, QueryConstraint};
pub use route::segment::{classify_segment, RouteSegment};
pub use route::url::{match_to_url, UrlOptions};

// ============================================================================
// Core Types
// ============================================================================

/// Key under which a path value was captured.
///
/// Named parameters (`:id`, `;tab`, query captures) bind under
/// [`CaptureKey::Named`]; wildcard and extra-segment captures bind under
/// [`CaptureKey::Index`], carrying the segment's absolute position in the
/// path.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CaptureKey {
    /// Bound by a named parameter or query capture.
    Named(String),
    /// Bound positionally by a wildcard or an extra trailing segment.
    Index(usize),
}

impl fmt::Display for CaptureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureKey::Named(name) => f.write_str(name),
            CaptureKey::Index(i) => write!(f, "{}", i),
        }
    }
}

/// Values extracted from a single pattern match.
///
/// An empty map is still a successful match; absence of the whole map
/// (`None` from [`Pattern::captures`]) is the only failure signal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureMap {
    entries: BTreeMap<CaptureKey, String>,
}

impl CaptureMap {
    /// Creates an empty capture map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a value under a named key.
    pub fn insert_named(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries
            .insert(CaptureKey::Named(name.into()), value.into());
    }

    /// Binds a value under a positional key.
    pub fn insert_index(&mut self, index: usize, value: impl Into<String>) {
        self.entries.insert(CaptureKey::Index(index), value.into());
    }

    /// Looks up a named capture.
    ///
    /// ```
    /// use deeplink_router::CaptureMap;
    ///
    /// let mut caps = CaptureMap::new();
    /// caps.insert_named("id", "42");
    /// assert_eq!(caps.get("id"), Some("42"));
    /// assert_eq!(caps.get("missing"), None);
    /// ```
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .get(&CaptureKey::Named(name.to_string()))
            .map(String::as_str)
    }

    /// Looks up a positional capture by its segment index.
    pub fn get_index(&self, index: usize) -> Option<&str> {
        self.entries
            .get(&CaptureKey::Index(index))
            .map(String::as_str)
    }

    /// True when the match captured nothing.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of captured values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterates over all captures in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&CaptureKey, &str)> {
        self.entries.iter().map(|(k, v)| (k, v.as_str()))
    }

    /// Iterates over named captures only, skipping positional ones.
    pub fn named(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().filter_map(|(k, v)| match k {
            CaptureKey::Named(name) => Some((name.as_str(), v.as_str())),
            CaptureKey::Index(_) => None,
        })
    }

    /// True when every capture is positional and at least one exists.
    pub fn only_positional(&self) -> bool {
        !self.entries.is_empty()
            && self
                .entries
                .keys()
                .all(|k| matches!(k, CaptureKey::Index(_)))
    }
}

/// Result of evaluating a path against a set of registered patterns.
///
/// Entries are keyed by the pattern's normalized string form, in the order
/// the patterns were supplied. A key being present means "matched", even
/// when its capture map is empty; an absent key means that pattern did not
/// match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
    entries: Vec<(String, CaptureMap)>,
}

impl MatchSet {
    /// Creates an empty match set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a confirmed match for a pattern key.
    pub fn insert(&mut self, key: impl Into<String>, captures: CaptureMap) {
        self.entries.push((key.into(), captures));
    }

    /// Looks up the captures for a matched pattern key.
    pub fn get(&self, key: &str) -> Option<&CaptureMap> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, c)| c)
    }

    /// True when no pattern matched.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of matched patterns.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterates over matches in pattern registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CaptureMap)> {
        self.entries.iter().map(|(k, c)| (k.as_str(), c))
    }

    /// True when every matched pattern captured only positional values.
    ///
    /// A catch-all route (`*`) hitting on its own is not a real page hit;
    /// navigation treats a wildcard-only match set the same as no match.
    pub fn only_positional(&self) -> bool {
        !self.entries.is_empty()
            && self.entries.iter().all(|(_, c)| c.only_positional())
    }
}
