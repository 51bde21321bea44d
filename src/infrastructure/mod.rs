//! Infrastructure layer
//!
//! Configuration and logging setup.

mod config;
mod logging;

pub use config::{Config, DECLARATION_PREFIX_VAR, LOG_LEVEL_VAR};
pub use logging::init_logging;
