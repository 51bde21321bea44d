//! Variable store
//!
//! An in-process table of pipeline variables keyed by lookup key, preserving
//! the casing of the most recent write for display.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::codec::{display_name_from_env_key, to_env_key, to_lookup_key};
use crate::environment::EnvironmentBackend;

/// Key prefixes that belong to other conventions and are never pipeline variables.
pub const RESERVED_PREFIXES: [&str; 3] = ["INPUT_", "ENDPOINT_", "SECUREFILE_"];

/// A single pipeline variable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableEntry {
    /// Display name, cased as last written
    pub name: String,
    /// Variable value
    pub value: String,
    /// Whether the value is secret
    pub secret: bool,
}

impl VariableEntry {
    /// Creates a new entry
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>, secret: bool) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            secret,
        }
    }
}

/// Key naming rules the store decodes an environment with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Prefix marking a secret variable, e.g. `SECRET_`
    pub secret_prefix: String,
    /// Key holding the JSON list of declared public names
    pub public_declaration_key: String,
    /// Key holding the JSON list of declared secret names
    pub secret_declaration_key: String,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            secret_prefix: "SECRET_".to_string(),
            public_declaration_key: "VSTS_PUBLIC_VARIABLES".to_string(),
            secret_declaration_key: "VSTS_SECRET_VARIABLES".to_string(),
        }
    }
}

impl LoadOptions {
    fn is_reserved(&self, key: &str) -> bool {
        key == self.public_declaration_key
            || key == self.secret_declaration_key
            || RESERVED_PREFIXES.iter().any(|p| key.starts_with(p))
    }
}

/// Table of pipeline variables
#[derive(Debug, Clone, Default)]
pub struct VariableStore {
    entries: AHashMap<String, VariableEntry>,
}

impl VariableStore {
    /// Creates an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole table with the variables decoded from `env`.
    ///
    /// Bare keys load as public entries named after the key, `SECRET_` keys
    /// load as secret entries and take precedence over a bare key with the same
    /// identity. Declaration lists are applied last and decide both the display
    /// name and the secret flag. A declaration list that is not a JSON array of
    /// strings is ignored.
    pub fn load(&mut self, env: &dyn EnvironmentBackend, options: &LoadOptions) {
        self.entries.clear();

        let mut bare = Vec::new();
        let mut secret = Vec::new();
        for (key, value) in env.snapshot() {
            if options.is_reserved(&key) {
                continue;
            }
            match key.strip_prefix(options.secret_prefix.as_str()) {
                Some(rest) if !rest.is_empty() => secret.push((rest.to_string(), value)),
                _ => bare.push((key, value)),
            }
        }

        for (key, value) in bare {
            trace!(name = %key, "loaded variable");
            self.insert(display_name_from_env_key(&key), value, false);
        }
        for (key, value) in secret {
            trace!(name = %key, "loaded secret variable");
            self.insert(display_name_from_env_key(&key), value, true);
        }

        for name in declared_names(env, &options.public_declaration_key) {
            if let Some(value) = env.peek(&to_env_key(&name)) {
                self.insert(name, value, false);
            }
        }
        for name in declared_names(env, &options.secret_declaration_key) {
            let key = format!("{}{}", options.secret_prefix, to_env_key(&name));
            if let Some(value) = env.peek(&key) {
                self.insert(name, value, true);
            }
        }

        debug!(
            total = self.entries.len(),
            secrets = self.entries.values().filter(|e| e.secret).count(),
            "variable store loaded"
        );
    }

    /// Looks up a variable by any casing or separator variant of its name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&VariableEntry> {
        self.entries.get(&to_lookup_key(name))
    }

    /// Inserts or updates a variable.
    ///
    /// An existing entry with the same identity is updated in place: it takes
    /// the incoming display name, value and secret flag.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>, secret: bool) {
        self.insert(name.into(), value.into(), secret);
    }

    /// Returns every entry, in no particular order
    #[must_use]
    pub fn list(&self) -> Vec<VariableEntry> {
        self.entries.values().cloned().collect()
    }

    /// Iterates over the secret entries
    pub fn secrets(&self) -> impl Iterator<Item = &VariableEntry> {
        self.entries.values().filter(|e| e.secret)
    }

    /// Returns the number of variables
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, name: String, value: String, secret: bool) {
        self.entries
            .insert(to_lookup_key(&name), VariableEntry { name, value, secret });
    }
}

fn declared_names(env: &dyn EnvironmentBackend, key: &str) -> Vec<String> {
    let Some(raw) = env.peek(key) else {
        return Vec::new();
    };
    match serde_json::from_str::<Vec<String>>(&raw) {
        Ok(names) => names,
        Err(err) => {
            warn!(key, error = %err, "ignoring malformed declaration list");
            Vec::new()
        }
    }
}
