/// Typed route segments
///
/// Pattern strings use single-character prefix sigils. Classification runs
/// once at parse time; the matcher only ever sees these variants and never
/// inspects sigil characters itself.

/// One term of a route pattern.
///
/// # Sigils
///
/// - `*` / `+` → [`RouteSegment::Wildcard`] (captures one segment
///   positionally; `+` carries the flagged variant)
/// - `:name` → [`RouteSegment::Param`]
/// - `@text` → [`RouteSegment::Pinned`] (must match, captures nothing)
/// - `;name` → [`RouteSegment::OptionalParam`] (enters optional mode)
/// - `|text` → [`RouteSegment::OptionalLiteral`]
/// - anything else → [`RouteSegment::Literal`]
///
/// # Examples
///
/// ```
/// use deeplink_router::{classify_segment, RouteSegment};
///
/// assert_eq!(classify_segment("user"), RouteSegment::Literal("user".into()));
/// assert_eq!(classify_segment(":id"), RouteSegment::Param("id".into()));
/// assert_eq!(classify_segment("*"), RouteSegment::Wildcard { plus: false });
/// assert_eq!(classify_segment("@admin"), RouteSegment::Pinned("admin".into()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteSegment {
    /// Exact text that the path segment must equal.
    Literal(String),
    /// Named parameter; captures the path segment under its name.
    Param(String),
    /// Captures the path segment under its positional index. `plus` marks
    /// the `+` spelling, which never enables suffix capture.
    Wildcard { plus: bool },
    /// Must equal the path segment exactly; contributes no capture.
    Pinned(String),
    /// Named parameter that switches matching into optional mode.
    OptionalParam(String),
    /// Literal that may be absent from the path entirely.
    OptionalLiteral(String),
}

/// Classifies a raw pattern segment into its typed form.
///
/// The classifier is total: there is no malformed segment, only a literal.
/// An inconsistent sigil combination shows up as a pattern that fails to
/// match, never as a parse error.
pub fn classify_segment(segment: &str) -> RouteSegment {
    match segment {
        "*" => return RouteSegment::Wildcard { plus: false },
        "+" => return RouteSegment::Wildcard { plus: true },
        _ => {}
    }

    if let Some(name) = segment.strip_prefix(':') {
        RouteSegment::Param(name.to_string())
    } else if let Some(text) = segment.strip_prefix('@') {
        RouteSegment::Pinned(text.to_string())
    } else if let Some(name) = segment.strip_prefix(';') {
        RouteSegment::OptionalParam(name.to_string())
    } else if let Some(text) = segment.strip_prefix('|') {
        RouteSegment::OptionalLiteral(text.to_string())
    } else {
        RouteSegment::Literal(segment.to_string())
    }
}
