//! In-memory environment

use std::collections::HashMap;

use super::EnvironmentBackend;

/// An environment held in memory
///
/// # Example
///
/// ```rust
/// use tasklib::environment::{EnvSnapshot, EnvironmentBackend};
///
/// let mut env = EnvSnapshot::from_pairs([("INPUT_NAME", "value")]);
/// assert_eq!(env.take("INPUT_NAME").as_deref(), Some("value"));
/// assert!(env.peek("INPUT_NAME").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot(HashMap<String, String>);

impl EnvSnapshot {
    /// Creates an empty environment
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an environment from key/value pairs
    #[must_use]
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Captures the current process environment
    #[must_use]
    pub fn capture() -> Self {
        Self::from_pairs(super::ProcessEnvironment::new().snapshot())
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Returns the number of keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no keys are set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl EnvironmentBackend for EnvSnapshot {
    fn peek(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }

    fn take(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    fn set(&mut self, key: &str, value: &str) {
        self.0.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.0.remove(key);
    }

    fn snapshot(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_case_sensitive() {
        let env = EnvSnapshot::new().with("ENDPOINT_URL_id1", "http://url");
        assert!(env.peek("ENDPOINT_URL_id1").is_some());
        assert!(env.peek("ENDPOINT_URL_ID1").is_none());
    }

    #[test]
    fn test_from_pairs() {
        let env = EnvSnapshot::from_pairs([("A", "1"), ("B", "2")]);
        assert_eq!(env.len(), 2);
        assert_eq!(env.peek("B").as_deref(), Some("2"));
    }
}
