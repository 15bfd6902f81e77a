/// URL generation, the inverse of matching
///
/// Substitutes captured values back into a pattern template and rebuilds a
/// fragment href, folding leftover captures into the query string.

use crate::path::{self, QueryMap};
use crate::{CaptureKey, CaptureMap};

/// Switches for [`match_to_url`].
#[derive(Debug, Clone, Copy)]
pub struct UrlOptions<'a> {
    /// Extra trailing segment: replaces a `*` placeholder if the template
    /// has one, otherwise appended after the final segment.
    pub append: Option<&'a str>,
    /// When false, the query-rebuilding step is skipped entirely and the
    /// template's own query (if any) is left as written.
    pub with_query: bool,
    /// The currently active query state to merge under the generated
    /// pairs. Template query pairs and leftover captures win on clashes.
    pub active_query: Option<&'a QueryMap>,
}

impl Default for UrlOptions<'_> {
    fn default() -> Self {
        Self {
            append: None,
            with_query: true,
            active_query: None,
        }
    }
}

/// Renders a capture map back into a fragment href for a template.
///
/// Named captures substitute into `:name` placeholders and into `{name}`
/// placeholders (the latter rendering `name=value`), consuming the capture
/// either way. Positional captures never substitute and never reach the
/// query. Unless suppressed, leftover named captures are merged with the
/// active query and the template's own query pairs, empty values dropped,
/// and the result serialized after a `?`.
///
/// # Examples
///
/// ```
/// use deeplink_router::{match_to_url, MatchOptions, Pattern, UrlOptions};
///
/// let pattern = Pattern::parse("user/:id");
/// let caps = pattern.captures("#/user/42", MatchOptions::default()).unwrap();
/// assert_eq!(match_to_url(&caps, "user/:id", &UrlOptions::default()), "#/user/42/");
/// ```
pub fn match_to_url(captures: &CaptureMap, template: &str, opts: &UrlOptions) -> String {
    let mut path = path::trim_path_keep_query(template).to_string();
    let mut leftover: Vec<(String, String)> = Vec::new();

    for (key, value) in captures.iter() {
        // Positional captures are never appended as path properties.
        let name = match key {
            CaptureKey::Named(name) => name,
            CaptureKey::Index(_) => continue,
        };

        let colon = format!(":{}", name);
        let brace = format!("{{{}}}", name);
        let mut consumed = false;

        if path.contains(&colon) {
            path = path.replacen(&colon, value, 1);
            consumed = true;
        }
        if path.contains(&brace) {
            path = path.replacen(&brace, &format!("{}={}", name, value), 1);
            consumed = true;
        }
        if !consumed {
            leftover.push((name.clone(), value.to_string()));
        }
    }

    if let Some(add) = opts.append {
        if path.starts_with('?') {
            path = format!("/{}/", add);
        } else if path.contains('*') {
            path = path.replacen('*', add, 1);
        } else {
            path = format!("{}/{}", path, add);
        }
    }

    if opts.with_query {
        let (route, template_query) = path::split_query(&path);

        let mut merged = QueryMap::new();
        if let Some(active) = opts.active_query {
            merged.merge(active);
        }
        merged.merge(&template_query);
        merged.extend(leftover);
        merged.retain(|_, v| !v.is_empty());

        path = route;
        if !merged.is_empty() {
            path.push('?');
            path.push_str(&merged.serialize());
        }
    }

    format!("#{}", path)
}
