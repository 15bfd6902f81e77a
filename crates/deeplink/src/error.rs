//! Error types for the navigation engine.
//!
//! Match failures are not errors; they are absent entries in a
//! [`MatchSet`](deeplink_router::MatchSet). The only navigation-level
//! failure is a path no registered pattern matched, which surfaces as a
//! single error event and a fallback title, never as a panic or a retry.

use thiserror::Error;

/// A navigation that could not be routed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigateError {
    /// No registered pattern matched the path.
    #[error("not_found: {path}")]
    NotFound {
        /// The offending path, verbatim as navigated.
        path: String,
    },
}

impl NavigateError {
    /// Machine-readable reason, as carried on the error event.
    pub fn reason(&self) -> &'static str {
        match self {
            NavigateError::NotFound { .. } => "not_found",
        }
    }

    /// The path that failed to route.
    pub fn path(&self) -> &str {
        match self {
            NavigateError::NotFound { path } => path,
        }
    }
}

/// Failure of a [`Lexicon`](crate::Lexicon) lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexiconError {
    /// No entry exists under the key path.
    #[error("missing lexicon entry: {key}")]
    Missing { key: String },

    /// An entry exists but is not a display string.
    #[error("lexicon entry is not a string: {key}")]
    NotAString { key: String },
}

/// Failure to load or parse a [`DeeplinkConfig`](crate::DeeplinkConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_carries_reason_and_path() {
        let err = NavigateError::NotFound {
            path: "#/nonexistent".to_string(),
        };
        assert_eq!(err.reason(), "not_found");
        assert_eq!(err.path(), "#/nonexistent");
        assert_eq!(err.to_string(), "not_found: #/nonexistent");
    }
}
