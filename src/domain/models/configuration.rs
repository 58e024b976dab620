//! The configuration mapping assembled by a fold.
//!
//! A [`Configuration`] maps string keys to arbitrary JSON values. The engine
//! only ever assigns or overwrites top-level keys; nested values are opaque.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Partial mapping returned by a component's `configure` call.
///
/// Applied onto the working configuration with top-level overwrite.
pub type ConfigPatch = Configuration;

/// Mapping from string keys to arbitrary values.
///
/// Keys keep insertion order for display, but equality is by value and
/// ignores ordering. Cloning is a deep copy: the clone owns all of its
/// values and shares no structure with the original.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Configuration(Map<String, Value>);

impl Configuration {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Look up a top-level value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Look up a top-level value as a string slice
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Whether a top-level key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Set a top-level key, returning the previous value if any
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Builder-style [`insert`](Self::insert)
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Number of top-level keys
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the configuration has no keys
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over top-level keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Iterate over top-level entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Merge a patch into this configuration by top-level overwrite.
    ///
    /// Entries in `patch` replace existing entries with the same key; nested
    /// objects are replaced wholesale, never merged. Returns the keys written,
    /// in patch order.
    pub fn apply(&mut self, patch: ConfigPatch) -> Vec<String> {
        let mut written = Vec::with_capacity(patch.len());
        for (key, value) in patch.0 {
            written.push(key.clone());
            self.0.insert(key, value);
        }
        written
    }

    /// Borrow the underlying JSON map
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consume into the underlying JSON map
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Configuration {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Configuration> for Value {
    fn from(config: Configuration) -> Self {
        Self::Object(config.0)
    }
}

impl TryFrom<Value> for Configuration {
    type Error = Value;

    /// Succeeds only for JSON objects; any other value is handed back.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(other),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Configuration {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl IntoIterator for Configuration {
    type Item = (String, Value);
    type IntoIter = serde_json::map::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Configuration {
    type Item = (&'a String, &'a Value);
    type IntoIter = serde_json::map::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_apply_overwrites_top_level_keys() {
        let mut config = Configuration::new().with("x", 1).with("y", "keep");
        let written = config.apply(Configuration::new().with("x", 2).with("z", true));

        assert_eq!(written, vec!["x".to_string(), "z".to_string()]);
        assert_eq!(config.get("x"), Some(&json!(2)));
        assert_eq!(config.get("y"), Some(&json!("keep")));
        assert_eq!(config.get("z"), Some(&json!(true)));
    }

    #[test]
    fn test_apply_replaces_nested_values_wholesale() {
        let mut config = Configuration::new().with("db", json!({"host": "a", "port": 1}));
        config.apply(Configuration::new().with("db", json!({"host": "b"})));

        assert_eq!(config.get("db"), Some(&json!({"host": "b"})));
    }

    #[test]
    fn test_clone_is_independent() {
        let original = Configuration::new().with("list", json!([1, 2]));
        let mut copy = original.clone();
        copy.insert("list", json!([3]));
        copy.insert("extra", "x");

        assert_eq!(original.get("list"), Some(&json!([1, 2])));
        assert!(!original.contains_key("extra"));
    }

    #[test]
    fn test_equality_ignores_key_order() {
        let a = Configuration::new().with("a", 1).with("b", 2);
        let b = Configuration::new().with("b", 2).with("a", 1);
        assert_eq!(a, b);
    }

    #[test]
    fn test_keys_follow_insertion_order() {
        let config = Configuration::new().with("foo", "bar").with("bar", "baz");
        assert_eq!(config.keys().collect::<Vec<_>>(), vec!["foo", "bar"]);
    }

    #[test]
    fn test_serde_is_transparent() {
        let config: Configuration = serde_json::from_value(json!({"x": 1})).unwrap();
        assert_eq!(config.get("x"), Some(&json!(1)));
        assert_eq!(serde_json::to_value(&config).unwrap(), json!({"x": 1}));
    }

    #[test]
    fn test_try_from_rejects_non_objects() {
        assert!(Configuration::try_from(json!({"a": 1})).is_ok());
        assert_eq!(Configuration::try_from(json!([1])), Err(json!([1])));
    }
}
