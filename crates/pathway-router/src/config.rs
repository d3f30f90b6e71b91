//! Router configuration.

use serde::Deserialize;

/// Settings for a [`Router`](crate::Router).
///
/// Deserializable so a host application can keep it in its own config file:
///
/// ```
/// use pathway_router::RouterConfig;
///
/// let config: RouterConfig = serde_json::from_str(r#"{"context_path": "/app"}"#).unwrap();
/// assert_eq!(config.context_path, "/app");
/// assert!(config.optional_trailing_slash);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Prefix for rendered URIs. Matching expects application-relative paths.
    pub context_path: String,
    /// Accept one trailing `/` after a pattern's last literal or placeholder.
    pub optional_trailing_slash: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            context_path: String::new(),
            optional_trailing_slash: true,
        }
    }
}

impl RouterConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the context path.
    #[must_use]
    pub fn with_context_path(mut self, path: impl Into<String>) -> Self {
        self.context_path = path.into();
        self
    }

    /// Sets whether a trailing `/` is tolerated.
    #[must_use]
    pub const fn with_optional_trailing_slash(mut self, optional: bool) -> Self {
        self.optional_trailing_slash = optional;
        self
    }

    /// The context path with a leading `/` and no trailing `/`; empty when
    /// unset or `/`.
    #[must_use]
    pub fn normalized_context_path(&self) -> String {
        let trimmed = self.context_path.trim_matches('/');
        if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{trimmed}")
        }
    }
}
