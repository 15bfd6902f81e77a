/// Path utilities for trimming, canonicalization, and query extraction
///
/// All functions are **pure**: given the same input, they always produce the
/// same output with no side effects. A pattern and a path are only
/// comparable after both have passed through [`trim_path`] and had their
/// query strings split off with [`split_query`].

pub mod query;

pub use query::QueryMap;

/// Strips the query suffix plus a leading `#`, one leading `/`, and one
/// trailing `/` from a path.
///
/// ```
/// use deeplink_router::path::trim_path;
///
/// assert_eq!(trim_path("#/user/42/"), "user/42");
/// assert_eq!(trim_path("/search?q=hello"), "search");
/// assert_eq!(trim_path(""), "");
/// assert_eq!(trim_path("/"), "");
/// ```
pub fn trim_path(path: &str) -> &str {
    let path = match path.find('?') {
        Some(i) => &path[..i],
        None => path,
    };
    trim_route(path)
}

/// Like [`trim_path`] but keeps the query suffix in place.
///
/// Used when a pattern's raw string form must survive normalization, e.g.
/// as a registry key or a URL template.
pub fn trim_path_keep_query(path: &str) -> &str {
    trim_route(path)
}

fn trim_route(path: &str) -> &str {
    let path = path.strip_prefix('#').unwrap_or(path);
    let path = path.strip_prefix('/').unwrap_or(path);
    path.strip_suffix('/').unwrap_or(path)
}

/// Renders a path in absolute form (`/path/to/`), reattaching any query
/// after the trailing slash. The empty route renders as the empty string.
///
/// ```
/// use deeplink_router::path::absolute_path;
///
/// assert_eq!(absolute_path("user/42"), "/user/42/");
/// assert_eq!(absolute_path("search?q=hi"), "/search/?q=hi");
/// assert_eq!(absolute_path(""), "");
/// ```
pub fn absolute_path(path: &str) -> String {
    let joined = if let Some(i) = path.find('?') {
        format!("{}/?{}", trim_path(&path[..i]), &path[i + 1..])
    } else {
        format!("{}/", trim_path(path))
    };

    // No path is set, return an empty string
    if joined == "/" {
        return String::new();
    }

    format!("/{}", joined)
}

/// Splits a path into its absolute route form and a parsed query map.
///
/// A path that is nothing but a query (`?x=1`) yields an empty route. A
/// stray trailing slash after the query (some hosts append one when a port
/// is present) is dropped before parsing.
///
/// ```
/// use deeplink_router::path::split_query;
///
/// let (route, query) = split_query("#/search?q=hello");
/// assert_eq!(route, "/search/");
/// assert_eq!(query.get("q"), Some("hello"));
///
/// let (route, query) = split_query("?tab=1");
/// assert_eq!(route, "");
/// assert_eq!(query.get("tab"), Some("1"));
/// ```
pub fn split_query(path: &str) -> (String, QueryMap) {
    if let Some(i) = path.find('?') {
        let path = path.strip_suffix('/').unwrap_or(path);
        let query = QueryMap::parse(&path[i + 1..]);
        if i == 0 {
            return (String::new(), query);
        }
        return (absolute_path(&path[..i]), query);
    }

    (absolute_path(path), QueryMap::new())
}

/// Splits a trimmed route into its segments; the empty route has none.
///
/// ```
/// use deeplink_router::path::segments;
///
/// assert_eq!(segments("#/user/42"), vec!["user", "42"]);
/// assert!(segments("/").is_empty());
/// ```
pub fn segments(path: &str) -> Vec<&str> {
    let trimmed = trim_path(path);
    if trimmed.is_empty() {
        Vec::new()
    } else {
        trimmed.split('/').collect()
    }
}
