//! Page-title assembly.
//!
//! Titles live in the lexicon's `deeplink` block; per-page entries live
//! under `deeplink.pages`, keyed by path segment. Each level can declare a
//! `<` entry ("prepend to titles beneath me") and a `/` entry ("my own
//! title"). The deepest page title comes first, then the `<` chain from
//! deep to shallow, then the root title, then the base title.

use deeplink_router::path::trim_path;

use crate::lexicon::Lexicon;

/// Resolves a key path under the lexicon's `deeplink` block.
///
/// With `for_page`, the path is further rooted under `deeplink.pages`.
/// Any lookup failure reads as "no entry".
pub(crate) fn loc(lexicon: Option<&dyn Lexicon>, parts: &[&str], for_page: bool) -> Option<String> {
    let lexicon = lexicon?;
    let mut keys: Vec<&str> = Vec::with_capacity(parts.len() + 2);
    keys.push("deeplink");
    if for_page {
        keys.push("pages");
    }
    keys.extend_from_slice(parts);
    lexicon.lookup(&keys).ok()
}

/// Resolves a display string under the lexicon's `error` block, falling
/// back to the key itself when no entry exists.
pub(crate) fn error_text(lexicon: Option<&dyn Lexicon>, part: &str) -> String {
    lexicon
        .and_then(|l| l.lookup(&["error", part]).ok())
        .unwrap_or_else(|| part.to_string())
}

/// Collects the title stack for a path, deepest entry first.
pub(crate) fn current_title_parts(
    lexicon: Option<&dyn Lexicon>,
    path: &str,
    root_title: Option<&str>,
) -> Vec<String> {
    let trimmed = trim_path(path);

    let mut parts: Vec<String> = Vec::new();
    if let Some(root) = root_title {
        parts.push(root.to_string());
    }

    // The empty route still walks one level, under the "/" page key.
    let segs: Vec<&str> = if trimmed.is_empty() {
        vec![""]
    } else {
        trimmed.split('/').collect()
    };

    let mut nesting: Vec<&str> = Vec::new();
    for seg in &segs {
        let entry = if seg.is_empty() {
            loc(lexicon, &["/"], true)
        } else {
            loc(lexicon, &[seg, "<"], true)
        };
        if let Some(entry) = entry {
            parts.insert(0, entry);
        }
        nesting.push(seg);
    }

    // The deepest page's own title: bare key, then its "/" entry.
    let mut last = loc(lexicon, &nesting, true);
    if last.is_none() {
        nesting.push("/");
        last = loc(lexicon, &nesting, true);
    }
    if let Some(last) = last {
        parts.insert(0, last);
    }

    parts
}

/// Joins title parts with the separator and appends the base title.
pub(crate) fn join_title(parts: &[&str], base: &str, separator: &str) -> String {
    let mut all: Vec<&str> = parts.iter().copied().filter(|p| !p.is_empty()).collect();
    if !base.is_empty() {
        all.push(base);
    }
    all.join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::JsonLexicon;
    use serde_json::json;

    fn lexicon() -> JsonLexicon {
        JsonLexicon::new(json!({
            "deeplink": {
                "errorTitle": "Not Found",
                "pages": {
                    "/": "Home",
                    "mail": {
                        "<": "Mail",
                        "/": "All Mail",
                        "inbox": { "/": "Inbox" }
                    },
                    "about": "About"
                }
            },
            "error": { "not_found": "Page not found" }
        }))
    }

    #[test]
    fn test_root_path_uses_slash_entry() {
        let lex = lexicon();
        let parts = current_title_parts(Some(&lex), "", None);
        assert_eq!(parts, vec!["Home".to_string()]);
    }

    #[test]
    fn test_nested_page_prepends_parent_chain() {
        let lex = lexicon();
        let parts = current_title_parts(Some(&lex), "#/mail/inbox", None);
        assert_eq!(parts, vec!["Inbox".to_string(), "Mail".to_string()]);
    }

    #[test]
    fn test_simple_string_route_title() {
        let lex = lexicon();
        let parts = current_title_parts(Some(&lex), "#/about", None);
        assert_eq!(parts, vec!["About".to_string()]);
    }

    #[test]
    fn test_root_title_sits_after_page_titles() {
        let lex = lexicon();
        let parts = current_title_parts(Some(&lex), "#/mail/inbox", Some("App"));
        assert_eq!(
            parts,
            vec!["Inbox".to_string(), "Mail".to_string(), "App".to_string()]
        );
    }

    #[test]
    fn test_unknown_path_collects_nothing() {
        let lex = lexicon();
        let parts = current_title_parts(Some(&lex), "#/nonexistent", None);
        assert!(parts.is_empty());
    }

    #[test]
    fn test_join_title_appends_base() {
        assert_eq!(join_title(&["Inbox", "Mail"], "Notes", " - "), "Inbox - Mail - Notes");
        assert_eq!(join_title(&[], "Notes", " - "), "Notes");
        assert_eq!(join_title(&["Inbox"], "", " - "), "Inbox");
    }

    #[test]
    fn test_error_text_falls_back_to_key() {
        let lex = lexicon();
        assert_eq!(error_text(Some(&lex), "not_found"), "Page not found");
        assert_eq!(error_text(Some(&lex), "unknown_kind"), "unknown_kind");
        assert_eq!(error_text(None, "not_found"), "not_found");
    }
}
