//! Task context
//!
//! The context owns the environment a task was started with and the
//! variable store decoded from it. Every accessor goes through it:
//!
//! - variables: [`TaskContext::get_variable`], [`TaskContext::set_variable`], [`TaskContext::variables`]
//! - inputs: [`TaskContext::get_input`] and the typed variants
//! - endpoints: [`TaskContext::get_endpoint_url`], [`TaskContext::get_endpoint_authorization`], ...
//! - paths: [`TaskContext::resolve`], [`TaskContext::file_path_supplied`]

mod endpoints;
mod inputs;
mod paths;


use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::environment::{EnvironmentBackend, ProcessEnvironment};
use crate::infrastructure::Config;
use crate::variables::{VariableEntry, VariableStore, to_env_key};

pub use endpoints::Authorization;
pub use paths::resolve_from;

/// Replacement text for masked secrets
pub const MASK: &str = "***";

/// A task context shared behind a single mutex
pub type SharedContext<E> = Arc<Mutex<TaskContext<E>>>;

/// Runtime context of a task
///
/// # Example
///
/// ```rust
/// use tasklib::{Config, EnvSnapshot, TaskContext};
///
/// let env = EnvSnapshot::from_pairs([
///     ("BUILD_REPOSITORY_NAME", "my-repo"),
///     ("INPUT_TARGET", "  release  "),
/// ]);
/// let mut ctx = TaskContext::new(env, Config::default());
///
/// assert_eq!(ctx.get_variable("Build.Repository.Name"), Some("my-repo"));
/// assert_eq!(ctx.get_input("target", true).unwrap().as_deref(), Some("release"));
/// ```
#[derive(Debug)]
pub struct TaskContext<E: EnvironmentBackend = ProcessEnvironment> {
    env: E,
    store: VariableStore,
    config: Config,
    cwd: PathBuf,
    masked: Vec<String>,
}

impl TaskContext<ProcessEnvironment> {
    /// Creates a context over the process environment
    #[must_use]
    pub fn from_process() -> Self {
        Self::new(ProcessEnvironment::new(), Config::from_env())
    }
}

impl<E: EnvironmentBackend> TaskContext<E> {
    /// Creates a context and loads the variable store from `env`
    #[must_use]
    pub fn new(env: E, config: Config) -> Self {
        let mut ctx = Self {
            env,
            store: VariableStore::new(),
            config,
            cwd: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            masked: Vec::new(),
        };
        ctx.reload();
        ctx
    }

    /// Sets the directory relative paths resolve against
    #[must_use]
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = cwd.into();
        self
    }

    /// Rebuilds the variable store from the current environment
    pub fn reload(&mut self) {
        let options = self.config.load_options();
        self.store.load(&self.env, &options);
    }

    /// Gets the configuration
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Gets the working directory
    #[must_use]
    pub fn cwd(&self) -> &PathBuf {
        &self.cwd
    }

    /// Gets the environment backend
    #[must_use]
    pub fn env(&self) -> &E {
        &self.env
    }

    /// Gets the environment backend mutably
    pub fn env_mut(&mut self) -> &mut E {
        &mut self.env
    }

    /// Gets a variable value
    #[must_use]
    pub fn get_variable(&self, name: &str) -> Option<&str> {
        self.store.get(name).map(|entry| entry.value.as_str())
    }

    /// Gets a variable entry
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<&VariableEntry> {
        self.store.get(name)
    }

    /// Sets a variable.
    ///
    /// Public values are mirrored into the environment under the variable's
    /// environment key. Setting a secret removes that key instead.
    pub fn set_variable(&mut self, name: &str, value: &str, secret: bool) {
        let key = to_env_key(name);
        if secret {
            self.env.remove(&key);
        } else {
            self.env.set(&key, value);
        }
        self.store.set(name, value, secret);
        debug!(name, secret, "variable set");
    }

    /// Returns all variables, in no particular order
    #[must_use]
    pub fn variables(&self) -> Vec<VariableEntry> {
        self.store.list()
    }

    /// Registers an extra value to mask in output
    pub fn register_secret(&mut self, value: impl Into<String>) {
        let value = value.into();
        if !value.is_empty() && !self.masked.contains(&value) {
            self.masked.push(value);
        }
    }

    /// Replaces every known secret value in `text` with [`MASK`]
    #[must_use]
    pub fn mask_secrets(&self, text: &str) -> String {
        let mut secrets: Vec<&str> = self
            .store
            .secrets()
            .map(|entry| entry.value.as_str())
            .chain(self.masked.iter().map(String::as_str))
            .filter(|value| !value.is_empty())
            .collect();
        secrets.sort_unstable_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        secrets.dedup();

        secrets
            .into_iter()
            .fold(text.to_string(), |acc, secret| acc.replace(secret, MASK))
    }

    /// Wraps the context for access from several threads
    #[must_use]
    pub fn into_shared(self) -> SharedContext<E> {
        Arc::new(Mutex::new(self))
    }
}
