/// Per-pattern matching
///
/// `Pattern::captures` is a pure function from a raw path to
/// `Option<CaptureMap>`. Only confirmed successes ever reach a
/// [`MatchSet`]; there is no tentative insertion to retract later.

use crate::path::{self, QueryMap};
use crate::route::parser::{Pattern, QueryConstraint};
use crate::route::segment::RouteSegment;
use crate::{CaptureMap, MatchSet};

/// Match-mode switches supplied by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchOptions {
    /// Tolerate a path with more segments than the pattern. Patterns with
    /// `@` or `;` terms behave as if this were set.
    pub partial: bool,
    /// Enforce the pattern's query constraints against the path query.
    /// Capture bindings are extracted either way.
    pub query: bool,
}

impl MatchOptions {
    /// Exact matching with query constraints ignored.
    pub fn exact() -> Self {
        Self::default()
    }

    /// Partial matching: extra trailing path segments are tolerated and
    /// captured positionally.
    pub fn partial() -> Self {
        Self {
            partial: true,
            query: false,
        }
    }

    /// Enables query-constraint enforcement on top of `self`.
    pub fn with_query(mut self) -> Self {
        self.query = true;
        self
    }
}

impl Pattern {
    /// Matches this pattern against a raw path.
    ///
    /// The path may carry a leading `#`, surrounding slashes, and a
    /// `?query` suffix. Returns the captured values on a match; `None` on
    /// any mismatch. An empty capture map is a real match.
    ///
    /// # Segment rules
    ///
    /// Segments are compared left to right, cursor-synchronized:
    ///
    /// - a wildcard captures the path segment under its index and fails if
    ///   the segment is absent;
    /// - `:name` captures under the name and fails if absent;
    /// - `@text` must equal the path segment or the whole match fails;
    /// - `;name` captures and enters optional mode, so later literal
    ///   mismatches defer to length validation, and an absent segment ends
    ///   matching with what was captured so far;
    /// - `|text` may be absent (the empty root counts); once consumed it
    ///   re-arms strict length checking;
    /// - a plain literal requires equality unless optional mode is active.
    ///
    /// # Length policy
    ///
    /// Differing segment counts fail unless the pattern ends in a bare
    /// `*`, partial matching applies, or the pattern carries a `|` term;
    /// in the surviving cases every extra path segment is captured under
    /// its absolute index.
    ///
    /// # Examples
    ///
    /// ```
    /// use deeplink_router::{MatchOptions, Pattern};
    ///
    /// let files = Pattern::parse("files/*");
    /// let caps = files.captures("#/files/img/logo.png", MatchOptions::default()).unwrap();
    /// assert_eq!(caps.get_index(1), Some("img"));
    /// assert_eq!(caps.get_index(2), Some("logo.png"));
    /// ```
    pub fn captures(&self, raw_path: &str, opts: MatchOptions) -> Option<CaptureMap> {
        let (route, path_query) = path::split_query(raw_path);
        let segs = path::segments(&route);

        let partial = opts.partial || self.forces_partial();
        let lengths_differ = self.segments().len() != segs.len();

        if lengths_differ
            && !self.trailing_wildcard()
            && !partial
            && !self.tolerates_extra()
        {
            return None;
        }

        let mut caps = CaptureMap::new();
        let mut optional_mode = false;
        let mut must_match_length = false;

        for (idx, segment) in self.segments().iter().enumerate() {
            let part = segs.get(idx).copied();

            match segment {
                RouteSegment::Wildcard { .. } => match part {
                    Some(p) => caps.insert_index(idx, p),
                    None => return None,
                },
                RouteSegment::Param(name) => match part {
                    Some(p) => caps.insert_named(name.as_str(), p),
                    None => return None,
                },
                RouteSegment::Pinned(text) => match part {
                    Some(p) if p == text.as_str() => {}
                    _ => return None,
                },
                RouteSegment::OptionalParam(name) => match part {
                    Some(p) => {
                        caps.insert_named(name.as_str(), p);
                        optional_mode = true;
                    }
                    None => break,
                },
                RouteSegment::OptionalLiteral(text) => match part {
                    Some(p) => {
                        must_match_length = true;
                        if p != text.as_str() && !optional_mode {
                            return None;
                        }
                    }
                    // Absent is fine; the empty root counts as a match.
                    None => break,
                },
                RouteSegment::Literal(text) => match part {
                    Some(p) if p == text.as_str() || optional_mode => {}
                    _ => return None,
                },
            }
        }

        // A consumed optional literal re-arms the length check.
        if must_match_length
            && segs.len() > self.segments().len()
            && !self.trailing_wildcard()
            && !partial
        {
            return None;
        }

        if lengths_differ {
            for (idx, part) in segs.iter().enumerate().skip(self.segments().len()) {
                caps.insert_index(idx, *part);
            }
        }

        // Query-only patterns always enforce their constraints; otherwise
        // enforcement is opt-in.
        if (opts.query || self.is_query_only()) && !self.query_satisfied(&path_query) {
            return None;
        }

        for constraint in self.query_constraints() {
            if let QueryConstraint::Capture { key, name } = constraint {
                if let Some(value) = path_query.get(key) {
                    caps.insert_named(name.as_str(), value);
                }
            }
        }

        Some(caps)
    }

    /// Checks the path query against this pattern's constraints.
    ///
    /// With no constraints declared, only an empty path query satisfies
    /// the check; enforcement means the query must match, not merely not
    /// conflict.
    fn query_satisfied(&self, path_query: &QueryMap) -> bool {
        if self.query_constraints().is_empty() {
            return path_query.is_empty();
        }

        self.query_constraints().iter().all(|c| match c {
            QueryConstraint::Equals { key, value } => path_query.get(key) == Some(value.as_str()),
            QueryConstraint::IfPresent { key, value } => match path_query.get(key) {
                None => true,
                Some(found) => found == value.as_str(),
            },
            QueryConstraint::Capture { .. } => true,
        })
    }
}

/// Evaluates a path against every pattern in order, accumulating only the
/// confirmed successes keyed by pattern string form.
///
/// ```
/// use deeplink_router::{match_all, MatchOptions, Pattern};
///
/// let patterns = vec![Pattern::parse("user/:id"), Pattern::parse("about")];
/// let matches = match_all("#/user/42", patterns.iter(), MatchOptions::default());
///
/// assert_eq!(matches.len(), 1);
/// assert_eq!(matches.get("user/:id").unwrap().get("id"), Some("42"));
/// assert!(matches.get("about").is_none());
/// ```
pub fn match_all<'a, I>(raw_path: &str, patterns: I, opts: MatchOptions) -> MatchSet
where
    I: IntoIterator<Item = &'a Pattern>,
{
    let mut set = MatchSet::new();
    for pattern in patterns {
        if let Some(caps) = pattern.captures(raw_path, opts) {
            set.insert(pattern.key(), caps);
        }
    }
    set
}
