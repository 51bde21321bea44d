//! # Tasklib - runtime context for pipeline agent tasks
//!
//! A build agent hands a task everything it needs through the process
//! environment: inputs as `INPUT_<NAME>`, pipeline variables under their
//! encoded names, secrets under `SECRET_<NAME>`, and service endpoints as
//! `ENDPOINT_<KIND>_<id>`. Tasklib decodes that flat table into a typed,
//! secret-aware context.
//!
//! ## Quick Start
//!
//! ```rust
//! use tasklib::prelude::*;
//!
//! let env = EnvSnapshot::from_pairs([
//!     ("INPUT_CONFIGURATION", "Release"),
//!     ("INPUT_PROJECTS", "app;lib"),
//!     ("SECRET_DEPLOY_TOKEN", "hunter2"),
//! ]);
//! let mut ctx = TaskContext::new(env, Config::default());
//!
//! assert_eq!(ctx.get_input_required("configuration").unwrap(), "Release");
//! assert_eq!(ctx.get_delimited_input("projects", ";", true).unwrap(), ["app", "lib"]);
//! assert!(ctx.variable("Deploy.Token").unwrap().secret);
//! assert_eq!(ctx.mask_secrets("token=hunter2"), "token=***");
//! ```
//!
//! ## Features
//!
//! - **Variable store**: case and separator insensitive names, last write wins for display
//! - **Secret tracking**: secrets are never mirrored back into the environment
//! - **Typed inputs**: string, bool, delimited list and checked paths
//! - **Endpoints**: url, authorization, scheme and data parameters, read once
//!
//! ## License
//!
//! Licensed under either of
//! - Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <https://www.apache.org/licenses/LICENSE-2.0>)
//! - MIT license ([LICENSE-MIT](LICENSE-MIT) or <https://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod context;
pub mod environment;
pub mod errors;
pub mod infrastructure;
pub mod variables;

// Prelude module for common imports
pub mod prelude;

// Re-export commonly used types
pub use context::{Authorization, MASK, SharedContext, TaskContext, resolve_from};
pub use environment::{EnvSnapshot, EnvironmentBackend, ProcessEnvironment};
pub use errors::{Result, TaskError};
pub use infrastructure::{Config, init_logging};
pub use variables::{VariableEntry, VariableStore, to_env_key, to_lookup_key};

/// Version of the tasklib crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
