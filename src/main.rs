//! tasklib - inspect the runtime context of a pipeline task
//!
//! Reads the environment a build agent prepared for a task and prints
//! what the task would see.
//!
//! ## Commands
//!
//! - `tasklib vars` - List pipeline variables, secrets masked
//! - `tasklib get` - Print one variable
//! - `tasklib input` - Resolve a task input
//! - `tasklib endpoint` - Resolve a service endpoint field
//! - `tasklib completions` - Generate shell completions
//!
//! ## Quick Start
//!
//! ```bash
//! # Show every variable the task can see
//! tasklib vars
//!
//! # Resolve a checked path input
//! INPUT_SOLUTION=app.sln tasklib input solution --path --check
//!
//! # Print the authorization scheme of an endpoint
//! tasklib endpoint id1 scheme
//! ```

use std::process::ExitCode;

mod cli;

fn main() -> ExitCode {
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            if std::env::var("TASKLIB_VERBOSE").is_ok() {
                eprintln!("{e:?}");
            }
            ExitCode::FAILURE
        }
    }
}
