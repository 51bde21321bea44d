//! Pipeline variables
//!
//! This module contains the name codec and the variable store.

mod codec;
mod store;

pub use codec::{display_name_from_env_key, to_env_key, to_lookup_key};
pub use store::{LoadOptions, RESERVED_PREFIXES, VariableEntry, VariableStore};
