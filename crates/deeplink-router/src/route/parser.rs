/// Pattern parsing
///
/// Transforms a raw pattern string into a [`Pattern`]: a typed segment
/// list, a set of query constraints, and the match-mode flags that the
/// sigils imply. Parsing is **total**: malformed syntax is never rejected,
/// it just produces a pattern that fails to match.

use crate::path::{self, QueryMap};
use crate::route::segment::{classify_segment, RouteSegment};

/// A single query-string requirement attached to a pattern.
///
/// Written in the pattern's query part:
///
/// - `key=value` → [`QueryConstraint::Equals`]
/// - `|key=value` → [`QueryConstraint::IfPresent`] (absence tolerated,
///   a differing present value still fails)
/// - `key=:name` or `{name}` → [`QueryConstraint::Capture`] (binds the
///   path's value instead of requiring equality)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryConstraint {
    /// The path query must hold exactly this value for the key.
    Equals { key: String, value: String },
    /// Checked only when the key is present in the path query.
    IfPresent { key: String, value: String },
    /// Binds the path query's value for `key` under `name`.
    Capture { key: String, name: String },
}

/// A parsed route pattern.
///
/// Stored and reported under its normalized string form (slash-trimmed,
/// query kept), which is also the key under which matches appear in a
/// [`MatchSet`](crate::MatchSet).
///
/// # Examples
///
/// ```
/// use deeplink_router::Pattern;
///
/// let pattern = Pattern::parse("#/user/:id/");
/// assert_eq!(pattern.key(), "user/:id");
/// assert_eq!(pattern.segments().len(), 2);
///
/// let search = Pattern::parse("search?q=:term");
/// assert_eq!(search.key(), "search?q=:term");
/// assert_eq!(search.query_constraints().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    key: String,
    segments: Vec<RouteSegment>,
    query: Vec<QueryConstraint>,
    trailing_wildcard: bool,
    forces_partial: bool,
    tolerates_extra: bool,
}

impl Pattern {
    /// Parses a raw pattern string.
    ///
    /// The raw form may carry a leading `#`, leading/trailing slashes, and
    /// a `?query` constraint suffix; all are normalized away. Flags derived
    /// here drive length policy at match time:
    ///
    /// - a trailing bare `*` enables suffix capture;
    /// - any `@` or `;` segment forces partial matching;
    /// - any `|` segment tolerates paths of a different length.
    pub fn parse(raw: &str) -> Self {
        let key = path::trim_path_keep_query(raw).to_string();

        let (route_part, query_part) = match key.find('?') {
            Some(i) => (&key[..i], &key[i + 1..]),
            None => (key.as_str(), ""),
        };

        let segments: Vec<RouteSegment> = path::segments(route_part)
            .into_iter()
            .map(classify_segment)
            .collect();

        let query: Vec<QueryConstraint> = QueryMap::parse(query_part)
            .iter()
            .map(|(k, v)| classify_constraint(k, v))
            .collect();

        let trailing_wildcard = matches!(
            segments.last(),
            Some(RouteSegment::Wildcard { plus: false })
        );
        let forces_partial = segments.iter().any(|s| {
            matches!(
                s,
                RouteSegment::Pinned(_) | RouteSegment::OptionalParam(_)
            )
        });
        let tolerates_extra = segments
            .iter()
            .any(|s| matches!(s, RouteSegment::OptionalLiteral(_)));

        Self {
            key,
            segments,
            query,
            trailing_wildcard,
            forces_partial,
            tolerates_extra,
        }
    }

    /// The pattern's normalized string form.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The typed segment list.
    pub fn segments(&self) -> &[RouteSegment] {
        &self.segments
    }

    /// The query constraints, if any.
    pub fn query_constraints(&self) -> &[QueryConstraint] {
        &self.query
    }

    /// True when the last segment is a bare `*`.
    pub fn trailing_wildcard(&self) -> bool {
        self.trailing_wildcard
    }

    /// True when the pattern implies partial matching (`@` or `;` terms).
    pub fn forces_partial(&self) -> bool {
        self.forces_partial
    }

    /// True when the pattern tolerates a path of different length (`|`).
    pub fn tolerates_extra(&self) -> bool {
        self.tolerates_extra
    }

    /// True for a pattern with no path segments at all.
    pub fn is_query_only(&self) -> bool {
        self.segments.is_empty() && !self.query.is_empty()
    }
}

fn classify_constraint(key: &str, value: &str) -> QueryConstraint {
    // {name} keys are shorthand for name=:name
    if let Some(inner) = key.strip_prefix('{').and_then(|k| k.strip_suffix('}')) {
        return QueryConstraint::Capture {
            key: inner.to_string(),
            name: inner.to_string(),
        };
    }

    if let Some(name) = value.strip_prefix(':') {
        return QueryConstraint::Capture {
            key: key.to_string(),
            name: name.to_string(),
        };
    }

    if let Some(key) = key.strip_prefix('|') {
        return QueryConstraint::IfPresent {
            key: key.to_string(),
            value: value.to_string(),
        };
    }

    QueryConstraint::Equals {
        key: key.to_string(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_literal_pattern() {
        let p = Pattern::parse("user/settings");
        assert_eq!(p.key(), "user/settings");
        assert_eq!(
            p.segments(),
            &[
                RouteSegment::Literal("user".to_string()),
                RouteSegment::Literal("settings".to_string()),
            ]
        );
        assert!(!p.trailing_wildcard());
        assert!(!p.forces_partial());
    }

    #[test]
    fn test_parse_normalizes_key() {
        let p = Pattern::parse("#/user/:id/");
        assert_eq!(p.key(), "user/:id");
    }

    #[test]
    fn test_parse_trailing_wildcard_flag() {
        assert!(Pattern::parse("files/*").trailing_wildcard());
        // + is flagged but never a suffix wildcard
        assert!(!Pattern::parse("files/+").trailing_wildcard());
        assert!(!Pattern::parse("*/files").trailing_wildcard());
    }

    #[test]
    fn test_parse_partial_forcing_sigils() {
        assert!(Pattern::parse("docs/@guide").forces_partial());
        assert!(Pattern::parse("docs/;page").forces_partial());
        assert!(!Pattern::parse("docs/:page").forces_partial());
    }

    #[test]
    fn test_parse_different_length_marker() {
        assert!(Pattern::parse("docs/|archive").tolerates_extra());
        assert!(!Pattern::parse("docs/archive").tolerates_extra());
    }

    #[test]
    fn test_parse_query_constraints() {
        let p = Pattern::parse("search?q=:term&lang=en&|page=1");
        let constraints = p.query_constraints();
        assert_eq!(constraints.len(), 3);
        assert!(constraints.contains(&QueryConstraint::Capture {
            key: "q".to_string(),
            name: "term".to_string(),
        }));
        assert!(constraints.contains(&QueryConstraint::Equals {
            key: "lang".to_string(),
            value: "en".to_string(),
        }));
        assert!(constraints.contains(&QueryConstraint::IfPresent {
            key: "page".to_string(),
            value: "1".to_string(),
        }));
    }

    #[test]
    fn test_parse_brace_capture_shorthand() {
        let p = Pattern::parse("list?{tag}");
        assert_eq!(
            p.query_constraints(),
            &[QueryConstraint::Capture {
                key: "tag".to_string(),
                name: "tag".to_string(),
            }]
        );
    }

    #[test]
    fn test_parse_query_only_pattern() {
        let p = Pattern::parse("?tab=settings");
        assert!(p.is_query_only());
        assert!(p.segments().is_empty());
    }

    #[test]
    fn test_parse_empty_pattern() {
        let p = Pattern::parse("");
        assert!(p.segments().is_empty());
        assert!(!p.is_query_only());
    }
}
