//! Error types for task context operations

use thiserror::Error;

/// Errors surfaced by the task context accessors
#[derive(Error, Debug)]
pub enum TaskError {
    /// A required input, endpoint field or path had no usable value
    #[error("Input required: {name}")]
    RequiredInputMissing {
        /// Name of the missing input or key.
        name: String,
    },

    /// An endpoint authorization blob was not valid JSON of the expected shape
    #[error("Failed to decode authorization for endpoint '{id}': {source}")]
    AuthDecode {
        /// Endpoint id.
        id: String,
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    /// A checked path does not exist
    #[error("Not found {name}: {path}")]
    PathNotFound {
        /// Name of the input that supplied the path.
        name: String,
        /// The path that was checked.
        path: String,
    },

    /// An endpoint url could not be parsed
    #[error("Invalid url for endpoint '{id}': {value}")]
    InvalidEndpointUrl {
        /// Endpoint id.
        id: String,
        /// The rejected value.
        value: String,
    },
}

impl TaskError {
    pub(crate) fn missing(name: impl Into<String>) -> Self {
        Self::RequiredInputMissing { name: name.into() }
    }
}

/// Result type for task context operations
pub type Result<T> = std::result::Result<T, TaskError>;
