//! `tasklib completions` - Generate shell completions
//!
//! Supports bash, zsh, fish, and PowerShell.

use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_complete::Shell;
use std::fs;
use std::path::Path;

/// Renders the completion script for `shell`
pub fn generate_completions(shell: Shell) -> Result<String> {
    use clap_complete::generate;

    let mut cmd = super::Args::command();
    let mut buf = Vec::new();
    generate(shell, &mut cmd, "tasklib", &mut buf);

    String::from_utf8(buf).context("Failed to generate completions")
}

/// Writes a completion script to `output_path`
pub fn save_completions(completions: &str, output_path: &Path) -> Result<()> {
    fs::write(output_path, completions)
        .with_context(|| format!("Failed to write completions to: {}", output_path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_bash_completions() {
        let script = generate_completions(Shell::Bash).unwrap();
        assert!(script.contains("tasklib"));
    }

    #[test]
    fn test_save_completions() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("tasklib.bash");
        save_completions("complete -F _tasklib tasklib", &path).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "complete -F _tasklib tasklib");
    }
}
