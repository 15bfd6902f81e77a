/// Query-string parsing and serialization
///
/// Holds `application/x-www-form-urlencoded` pairs in a sorted map so that
/// serialization is stable regardless of insertion order.

use std::borrow::Cow;
use std::collections::BTreeMap;

/// An ordered string → string query map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryMap {
    entries: BTreeMap<String, String>,
}

impl QueryMap {
    /// Creates an empty query map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a raw query string (without the leading `?`).
    ///
    /// Pairs without an `=` parse as a key with an empty value. Keys and
    /// values are percent-decoded; `+` decodes to a space. Undecodable
    /// input is kept verbatim rather than rejected.
    ///
    /// ```
    /// use deeplink_router::QueryMap;
    ///
    /// let query = QueryMap::parse("q=hello+world&page=2&flag");
    /// assert_eq!(query.get("q"), Some("hello world"));
    /// assert_eq!(query.get("page"), Some("2"));
    /// assert_eq!(query.get("flag"), Some(""));
    /// ```
    pub fn parse(raw: &str) -> Self {
        let mut map = Self::new();
        for pair in raw.split('&') {
            if pair.is_empty() {
                continue;
            }
            let (key, value) = match pair.split_once('=') {
                Some((k, v)) => (k, v),
                None => (pair, ""),
            };
            map.insert(decode_component(key), decode_component(value));
        }
        map
    }

    /// Serializes to a query string (without the leading `?`), keys in
    /// sorted order, keys and values percent-encoded.
    ///
    /// ```
    /// use deeplink_router::QueryMap;
    ///
    /// let mut query = QueryMap::new();
    /// query.insert("q", "hello world");
    /// query.insert("page", "2");
    /// assert_eq!(query.serialize(), "page=2&q=hello%20world");
    /// ```
    pub fn serialize(&self) -> String {
        self.entries
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Inserts a pair, replacing any previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Looks up a value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Removes a key, returning its value if present.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    /// True when the key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// True when the map holds no pairs.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterates over pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Copies every pair from `other` into `self`; `other` wins on clashes.
    pub fn merge(&mut self, other: &QueryMap) {
        for (k, v) in other.iter() {
            self.insert(k, v);
        }
    }

    /// Keeps only the pairs for which the predicate holds.
    pub fn retain(&mut self, mut keep: impl FnMut(&str, &str) -> bool) {
        self.entries.retain(|k, v| keep(k, v));
    }
}

impl Extend<(String, String)> for QueryMap {
    fn extend<I: IntoIterator<Item = (String, String)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl FromIterator<(String, String)> for QueryMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(Cow::Borrowed(_)) => spaced,
        Ok(Cow::Owned(decoded)) => decoded,
        Err(_) => spaced,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_pairs() {
        let q = QueryMap::parse("a=1&b=2");
        assert_eq!(q.get("a"), Some("1"));
        assert_eq!(q.get("b"), Some("2"));
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn test_parse_percent_and_plus_decoding() {
        let q = QueryMap::parse("msg=hello%20there&name=jo+ann");
        assert_eq!(q.get("msg"), Some("hello there"));
        assert_eq!(q.get("name"), Some("jo ann"));
    }

    #[test]
    fn test_parse_valueless_key() {
        let q = QueryMap::parse("flag&x=1");
        assert_eq!(q.get("flag"), Some(""));
        assert_eq!(q.get("x"), Some("1"));
    }

    #[test]
    fn test_parse_empty() {
        assert!(QueryMap::parse("").is_empty());
    }

    #[test]
    fn test_serialize_is_stable_and_encoded() {
        let mut q = QueryMap::new();
        q.insert("z", "last");
        q.insert("a", "first value");
        assert_eq!(q.serialize(), "a=first%20value&z=last");
    }

    #[test]
    fn test_round_trip() {
        let q = QueryMap::parse("a=1&b=two%20words");
        let again = QueryMap::parse(&q.serialize());
        assert_eq!(q, again);
    }

    #[test]
    fn test_merge_prefers_other() {
        let mut base = QueryMap::parse("a=1&b=2");
        let over = QueryMap::parse("b=3&c=4");
        base.merge(&over);
        assert_eq!(base.get("a"), Some("1"));
        assert_eq!(base.get("b"), Some("3"));
        assert_eq!(base.get("c"), Some("4"));
    }

    #[test]
    fn test_retain_drops_empty_values() {
        let mut q = QueryMap::parse("a=1&b=&c=3");
        q.retain(|_, v| !v.is_empty());
        assert_eq!(q.len(), 2);
        assert!(!q.contains_key("b"));
    }
}
