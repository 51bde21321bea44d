//! Name codec
//!
//! Maps canonical variable names (`Build.Repository.Name`) onto the
//! environment keys the agent publishes them under (`BUILD_REPOSITORY_NAME`)
//! and onto the lookup keys the variable store indexes by.

/// Characters that collapse to `_` in an environment key.
const SEPARATORS: [char; 2] = ['.', ' '];

/// Converts a canonical variable name into its environment key.
///
/// Every `.` and space becomes `_` and the result is uppercased. Total, never fails.
///
/// # Example
///
/// ```rust
/// use tasklib::variables::to_env_key;
///
/// assert_eq!(to_env_key("Build.Repository.Name"), "BUILD_REPOSITORY_NAME");
/// assert_eq!(to_env_key("file name"), "FILE_NAME");
/// ```
#[must_use]
pub fn to_env_key(name: &str) -> String {
    name.chars()
        .map(|c| if SEPARATORS.contains(&c) { '_' } else { c })
        .collect::<String>()
        .to_uppercase()
}

/// Converts a canonical variable name into the key the store indexes by.
///
/// Two names share a lookup key exactly when they share an environment key.
#[must_use]
pub fn to_lookup_key(name: &str) -> String {
    to_env_key(name).to_lowercase()
}

/// Best-effort display name for a variable known only by its environment key.
///
/// Separator punctuation cannot be recovered from the key, so the key stands
/// as its own name.
#[must_use]
pub fn display_name_from_env_key(key: &str) -> String {
    key.to_string()
}
