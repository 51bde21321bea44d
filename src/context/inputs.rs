//! Task inputs
//!
//! Inputs arrive as `INPUT_<NAME>` keys. Each read consumes its key.

use tracing::debug;

use super::TaskContext;
use crate::environment::EnvironmentBackend;
use crate::errors::{Result, TaskError};
use crate::variables::to_env_key;

/// Prefix of task input keys
pub const INPUT_PREFIX: &str = "INPUT_";

/// Environment key an input is published under
#[must_use]
pub fn input_key(name: &str) -> String {
    format!("{INPUT_PREFIX}{}", to_env_key(name))
}

impl<E: EnvironmentBackend> TaskContext<E> {
    /// Takes the trimmed value of an input, if set.
    pub(crate) fn take_input(&mut self, name: &str) -> Option<String> {
        if name.is_empty() {
            return None;
        }
        let value = self.env.take(&input_key(name))?;
        debug!(input = name, "input consumed");
        Some(value.trim().to_string())
    }

    /// Gets an input value, trimmed of surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::RequiredInputMissing`] if `required` is set and the
    /// input is unset or blank.
    pub fn get_input(&mut self, name: &str, required: bool) -> Result<Option<String>> {
        let value = self.take_input(name);
        if required && value.as_deref().is_none_or(str::is_empty) {
            return Err(TaskError::missing(name));
        }
        Ok(value)
    }

    /// Gets a required input value
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::RequiredInputMissing`] if the input is unset or blank.
    pub fn get_input_required(&mut self, name: &str) -> Result<String> {
        self.get_input(name, true).map(Option::unwrap_or_default)
    }

    /// Gets an input as a boolean.
    ///
    /// Only `true`, in any casing, reads as `true`. Anything else, including an
    /// unset optional input, reads as `false`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::RequiredInputMissing`] if `required` is set and the
    /// input is unset or blank.
    pub fn get_bool_input(&mut self, name: &str, required: bool) -> Result<bool> {
        let value = self.get_input(name, required)?;
        Ok(value.is_some_and(|v| v.eq_ignore_ascii_case("true")))
    }

    /// Gets an input split on `delimiter`, with empty segments dropped.
    ///
    /// An empty `delimiter` yields the whole value as a single segment.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::RequiredInputMissing`] if `required` is set and the
    /// input is unset or blank.
    pub fn get_delimited_input(
        &mut self,
        name: &str,
        delimiter: &str,
        required: bool,
    ) -> Result<Vec<String>> {
        let Some(value) = self.get_input(name, required)? else {
            return Ok(Vec::new());
        };
        if delimiter.is_empty() {
            return Ok(if value.is_empty() { Vec::new() } else { vec![value] });
        }
        Ok(value
            .split(delimiter)
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Gets an input holding a path, returned as supplied.
    ///
    /// With `check` set, a non-empty value must name an existing file or
    /// directory, resolved against the working directory.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::RequiredInputMissing`] if `required` is set and the
    /// input is unset or blank, and [`TaskError::PathNotFound`] if the checked
    /// path does not exist.
    pub fn get_path_input(
        &mut self,
        name: &str,
        required: bool,
        check: bool,
    ) -> Result<Option<String>> {
        let value = self.get_input(name, required)?;
        if check && let Some(path) = value.as_deref().filter(|p| !p.is_empty()) {
            self.check_path(name, path)?;
        }
        Ok(value)
    }

    /// Gets a required path input
    ///
    /// # Errors
    ///
    /// See [`TaskContext::get_path_input`].
    pub fn get_path_input_required(&mut self, name: &str, check: bool) -> Result<String> {
        self.get_path_input(name, true, check)
            .map(Option::unwrap_or_default)
    }
}
