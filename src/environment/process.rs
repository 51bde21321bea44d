//! Process environment

use tracing::warn;

use super::EnvironmentBackend;

/// The environment of the running process
///
/// Mutations go straight to the process table, which is shared by every
/// thread. Use a single `ProcessEnvironment` per process and keep writes
/// on one thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl ProcessEnvironment {
    /// Creates a handle to the process environment
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl EnvironmentBackend for ProcessEnvironment {
    fn peek(&self, key: &str) -> Option<String> {
        if !is_valid_key(key) {
            return None;
        }
        std::env::var(key).ok()
    }

    fn set(&mut self, key: &str, value: &str) {
        if !is_valid_key(key) || value.contains('\0') {
            warn!(key, "cannot write key to the process environment");
            return;
        }
        // SAFETY: task processes write their environment from a single thread.
        unsafe { std::env::set_var(key, value) };
    }

    fn remove(&mut self, key: &str) {
        if !is_valid_key(key) {
            warn!(key, "cannot remove key from the process environment");
            return;
        }
        // SAFETY: task processes write their environment from a single thread.
        unsafe { std::env::remove_var(key) };
    }

    fn snapshot(&self) -> Vec<(String, String)> {
        std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect()
    }
}

fn is_valid_key(key: &str) -> bool {
    !key.is_empty() && !key.contains('=') && !key.contains('\0')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_keys_are_ignored() {
        let mut env = ProcessEnvironment::new();
        assert!(env.peek("").is_none());
        assert!(env.peek("A=B").is_none());
        env.set("A=B", "value");
        env.remove("");
    }

    #[test]
    fn test_value_with_nul_is_not_written() {
        let mut env = ProcessEnvironment::new();
        let key = "TASKLIB_PROCESS_ENVIRONMENT_NUL_VALUE";
        env.set(key, "bad\0value");
        assert!(env.peek(key).is_none());
    }

    #[test]
    fn test_set_take_round_trip() {
        let mut env = ProcessEnvironment::new();
        let key = "TASKLIB_PROCESS_ENVIRONMENT_TEST_KEY";
        env.set(key, "value");
        assert_eq!(env.take(key).as_deref(), Some("value"));
        assert!(env.peek(key).is_none());
    }
}
