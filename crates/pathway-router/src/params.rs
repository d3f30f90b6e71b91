//! Parameter maps for matching and reverse routing.
//!
//! Both maps keep insertion order. Route patterns rarely carry more than a
//! handful of placeholders, so lookups are linear scans.

use std::fmt::Display;

/// Path parameters extracted from a matched path, in pattern order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams {
    params: Vec<(String, String)>,
}

impl PathParams {
    /// Creates new empty path params.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a parameter, replacing the value of an existing key in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.params.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.params.push((key, value)),
        }
    }

    /// Gets a parameter value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Gets a parameter value or returns an error.
    pub fn require(&self, key: &str) -> Result<&str, String> {
        self.get(key)
            .ok_or_else(|| format!("Missing path parameter: {key}"))
    }

    /// Parses a parameter as a specific type.
    #[must_use]
    pub fn parse<T: std::str::FromStr>(&self, key: &str) -> Option<T> {
        self.get(key).and_then(|v| v.parse().ok())
    }

    /// Returns true if the parameter was captured.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of captured parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns true if nothing was captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Returns an iterator over the parameters in pattern order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Values used to render a pattern back into a URI.
///
/// Values are stored in their textual form. Parameters that no placeholder
/// consumes end up in the query string, in insertion order.
///
/// ```
/// use pathway_router::UriParams;
///
/// let params = UriParams::new()
///     .with("email", "test@test.com")
///     .with("id", 5);
/// assert_eq!(params.get("id"), Some("5"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UriParams {
    params: Vec<(String, String)>,
}

impl UriParams {
    /// Creates an empty parameter map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value, builder style.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.insert(key, value);
        self
    }

    /// Adds a value. An existing key keeps its position and takes the new value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Display) {
        let key = key.into();
        let value = value.to_string();
        match self.params.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.params.push((key, value)),
        }
    }

    /// Gets the textual value of a parameter.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns true if there are no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Returns an iterator over the values in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Display> FromIterator<(K, V)> for UriParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

impl From<&PathParams> for UriParams {
    fn from(params: &PathParams) -> Self {
        params.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_params() {
        let mut params = PathParams::new();
        params.insert("id", "123");
        params.insert("name", "test");

        assert_eq!(params.get("id"), Some("123"));
        assert_eq!(params.parse::<i64>("id"), Some(123));
        assert_eq!(params.get("missing"), None);
        assert!(params.require("missing").is_err());
    }

    #[test]
    fn test_path_params_keep_order() {
        let mut params = PathParams::new();
        params.insert("b", "1");
        params.insert("a", "2");
        params.insert("b", "3");

        let pairs: Vec<_> = params.iter().collect();
        assert_eq!(pairs, vec![("b", "3"), ("a", "2")]);
    }

    #[test]
    fn test_uri_params_textual_values() {
        let params = UriParams::new()
            .with("id", 5)
            .with("ratio", 0.5)
            .with("flag", true);

        assert_eq!(params.get("id"), Some("5"));
        assert_eq!(params.get("ratio"), Some("0.5"));
        assert_eq!(params.get("flag"), Some("true"));
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn test_uri_params_from_iter() {
        let params: UriParams = [("x", 1), ("y", 2), ("x", 3)].into_iter().collect();
        let pairs: Vec<_> = params.iter().collect();
        assert_eq!(pairs, vec![("x", "3"), ("y", "2")]);
    }
}
