//! Localization lookup contract.
//!
//! The engine never owns display strings; it reads them from a host-supplied
//! lexicon. Lookups are key paths into a nested document, and a missing or
//! non-string entry is an `Err` the caller turns into "no title for this
//! level" rather than a failure.

use crate::error::LexiconError;

/// Read-only localization document.
pub trait Lexicon {
    /// Resolves a key path to a display string.
    fn lookup(&self, keys: &[&str]) -> Result<String, LexiconError>;
}

/// A [`Lexicon`] backed by a nested JSON document.
///
/// # Examples
///
/// ```
/// use deeplink::{JsonLexicon, Lexicon};
/// use serde_json::json;
///
/// let lexicon = JsonLexicon::new(json!({
///     "deeplink": { "baseTitle": "Notes", "pages": { "inbox": { "/": "Inbox" } } }
/// }));
///
/// let title = lexicon.lookup(&["deeplink", "pages", "inbox", "/"]).unwrap();
/// assert_eq!(title, "Inbox");
/// assert!(lexicon.lookup(&["deeplink", "pages", "missing"]).is_err());
/// ```
pub struct JsonLexicon {
    document: serde_json::Value,
}

impl JsonLexicon {
    /// Wraps a parsed localization document.
    pub fn new(document: serde_json::Value) -> Self {
        Self { document }
    }
}

impl Lexicon for JsonLexicon {
    fn lookup(&self, keys: &[&str]) -> Result<String, LexiconError> {
        let mut node = &self.document;
        for key in keys {
            node = node.get(key).ok_or_else(|| LexiconError::Missing {
                key: keys.join("."),
            })?;
        }

        node.as_str()
            .map(str::to_string)
            .ok_or_else(|| LexiconError::NotAString {
                key: keys.join("."),
            })
    }
}
