//! Environment backends
//!
//! The agent hands everything to a task through a flat key/value
//! environment. Backends abstract over where that table lives so the
//! task context can run against the real process environment or an
//! in-memory snapshot.

mod process;
mod snapshot;

pub use process::ProcessEnvironment;
pub use snapshot::EnvSnapshot;

/// A flat key/value environment
pub trait EnvironmentBackend {
    /// Reads a key without modifying the environment
    fn peek(&self, key: &str) -> Option<String>;

    /// Reads a key and clears it, so later reads observe absence
    fn take(&mut self, key: &str) -> Option<String> {
        let value = self.peek(key);
        if value.is_some() {
            self.remove(key);
        }
        value
    }

    /// Sets a key
    fn set(&mut self, key: &str, value: &str);

    /// Removes a key
    fn remove(&mut self, key: &str);

    /// Returns every visible key/value pair
    fn snapshot(&self) -> Vec<(String, String)>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_clears_key() {
        let mut env = EnvSnapshot::from_pairs([("INPUT_A", "1")]);
        assert_eq!(env.take("INPUT_A").as_deref(), Some("1"));
        assert_eq!(env.peek("INPUT_A"), None);
        assert_eq!(env.take("INPUT_A"), None);
    }

    #[test]
    fn test_peek_is_non_destructive() {
        let env = EnvSnapshot::from_pairs([("ENDPOINT_DATA_id1_P", "v")]);
        assert_eq!(env.peek("ENDPOINT_DATA_id1_P").as_deref(), Some("v"));
        assert_eq!(env.peek("ENDPOINT_DATA_id1_P").as_deref(), Some("v"));
    }

    #[test]
    fn test_trait_object_dispatch() {
        let mut env: Box<dyn EnvironmentBackend> = Box::new(EnvSnapshot::new());
        env.set("KEY", "value");
        assert_eq!(env.snapshot(), vec![("KEY".to_string(), "value".to_string())]);
        env.remove("KEY");
        assert!(env.snapshot().is_empty());
    }
}
