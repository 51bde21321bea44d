//! Prelude module for common imports

pub use crate::context::{Authorization, SharedContext, TaskContext, resolve_from};
pub use crate::environment::{EnvSnapshot, EnvironmentBackend, ProcessEnvironment};
pub use crate::errors::TaskError;
pub use crate::infrastructure::Config;
pub use crate::variables::{VariableEntry, VariableStore, to_env_key, to_lookup_key};
