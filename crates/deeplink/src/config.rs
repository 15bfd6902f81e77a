//! Engine configuration.
//!
//! Loadable from TOML, with builder methods for in-code setup. Every field
//! has a default, so a config file only states what it changes.

use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::error::ConfigError;

pub(crate) static DEFAULT_CONFIG: Lazy<DeeplinkConfig> = Lazy::new(DeeplinkConfig::default);

/// Settings for a [`Router`](crate::Router).
///
/// # Examples
///
/// ```
/// use deeplink::DeeplinkConfig;
///
/// let config = DeeplinkConfig::from_toml(r#"
///     base_title = "Notes"
///     title_separator = " | "
/// "#).unwrap();
///
/// assert_eq!(config.base_title.as_deref(), Some("Notes"));
/// assert_eq!(config.title_separator, " | ");
/// assert!(config.history_enabled);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DeeplinkConfig {
    /// Base page title, appended after every computed title. Falls back to
    /// the lexicon's `deeplink.baseTitle` when unset.
    pub base_title: Option<String>,
    /// Separator between title parts.
    pub title_separator: String,
    /// Title prefix applied above every page, before the base title.
    pub root_title: Option<String>,
    /// Whether tracked navigations go through the history backend.
    pub history_enabled: bool,
    /// Route to navigate to when activation finds an empty path.
    pub start_route: Option<String>,
}

impl Default for DeeplinkConfig {
    fn default() -> Self {
        Self {
            base_title: None,
            title_separator: " - ".to_string(),
            root_title: None,
            history_enabled: true,
            start_route: None,
        }
    }
}

impl DeeplinkConfig {
    /// Parses a config from TOML source.
    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Reads and parses a TOML config file.
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        Self::from_toml(&std::fs::read_to_string(path)?)
    }

    /// Sets the base page title.
    pub fn with_base_title(mut self, title: impl Into<String>) -> Self {
        self.base_title = Some(title.into());
        self
    }

    /// Sets the separator between title parts.
    pub fn with_title_separator(mut self, separator: impl Into<String>) -> Self {
        self.title_separator = separator.into();
        self
    }

    /// Sets the title prefix applied above every page.
    pub fn with_root_title(mut self, title: impl Into<String>) -> Self {
        self.root_title = Some(title.into());
        self
    }

    /// Enables or disables history tracking for navigations.
    pub fn with_history(mut self, enabled: bool) -> Self {
        self.history_enabled = enabled;
        self
    }

    /// Sets the route used when activation finds an empty path.
    pub fn with_start_route(mut self, route: impl Into<String>) -> Self {
        self.start_route = Some(route.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DeeplinkConfig::default();
        assert_eq!(config.title_separator, " - ");
        assert!(config.history_enabled);
        assert!(config.base_title.is_none());
        assert!(config.start_route.is_none());
    }

    #[test]
    fn test_from_toml_partial_override() {
        let config = DeeplinkConfig::from_toml("history_enabled = false").unwrap();
        assert!(!config.history_enabled);
        assert_eq!(config.title_separator, " - ");
    }

    #[test]
    fn test_from_toml_rejects_garbage() {
        assert!(DeeplinkConfig::from_toml("history_enabled = \"maybe").is_err());
    }

    #[test]
    fn test_builder_chain() {
        let config = DeeplinkConfig::default()
            .with_base_title("Notes")
            .with_title_separator(" | ")
            .with_start_route("/inbox");
        assert_eq!(config.base_title.as_deref(), Some("Notes"));
        assert_eq!(config.title_separator, " | ");
        assert_eq!(config.start_route.as_deref(), Some("/inbox"));
    }
}
