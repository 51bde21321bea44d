//! Path resolution and validation

use std::path::{Component, Path, PathBuf};

use tracing::debug;

use super::TaskContext;
use crate::environment::EnvironmentBackend;
use crate::errors::{Result, TaskError};
use crate::variables::to_env_key;

/// Resolves `segments` left to right against `cwd` into a normalized path.
///
/// An absolute segment replaces everything before it. `.` and `..` are
/// folded lexically; `..` never climbs above the root.
///
/// # Example
///
/// ```rust
/// use std::path::{Path, PathBuf};
/// use tasklib::resolve_from;
///
/// let path = resolve_from(Path::new("/work"), &["src", "../docs", "guide.md"]);
/// assert_eq!(path, PathBuf::from("/work/docs/guide.md"));
///
/// let path = resolve_from(Path::new("/work"), &["/repo/root", "/repo/root/some/path"]);
/// assert_eq!(path, PathBuf::from("/repo/root/some/path"));
/// ```
#[must_use]
pub fn resolve_from<P: AsRef<Path>>(cwd: &Path, segments: &[P]) -> PathBuf {
    let mut joined = cwd.to_path_buf();
    for segment in segments {
        joined.push(segment);
    }
    normalize(&joined)
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                if out.file_name().is_some() {
                    out.pop();
                }
            }
            Component::Normal(part) => out.push(part),
        }
    }
    out
}

impl<E: EnvironmentBackend> TaskContext<E> {
    /// Resolves `segments` against the working directory.
    #[must_use]
    pub fn resolve<P: AsRef<Path>>(&self, segments: &[P]) -> PathBuf {
        resolve_from(&self.cwd, segments)
    }

    /// Fails if `path` does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::PathNotFound`] naming the input and the path.
    pub fn check_path(&self, name: &str, path: &str) -> Result<()> {
        let resolved = self.resolve(&[path]);
        debug!(input = name, path = %resolved.display(), "checking path");
        if resolved.exists() {
            Ok(())
        } else {
            Err(TaskError::PathNotFound {
                name: name.to_string(),
                path: path.to_string(),
            })
        }
    }

    /// Returns true if the path input `name` differs from the default root.
    ///
    /// The default root is the first non-empty variable listed in
    /// [`Config::default_root_variables`](crate::Config), read from the store
    /// or, failing that, the environment. Consumes the input.
    pub fn file_path_supplied(&mut self, name: &str) -> bool {
        let supplied = self.take_input(name).unwrap_or_default();
        let root = self.default_root().unwrap_or_default();
        self.resolve(&[supplied]) != self.resolve(&[root])
    }

    fn default_root(&self) -> Option<String> {
        self.config
            .default_root_variables
            .iter()
            .find_map(|name| {
                self.get_variable(name)
                    .map(str::to_string)
                    .or_else(|| self.env.peek(&to_env_key(name)))
                    .filter(|value| !value.is_empty())
            })
    }
}
