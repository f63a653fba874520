//! Error types for code generation.

use thiserror::Error;

/// Result type alias for codegen operations.
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Errors that can occur during code generation.
#[derive(Error, Debug)]
pub enum CodegenError {
    /// No emitter is registered under the requested name.
    #[error("unsupported target '{}' (available: {})", .requested, .available.join(", "))]
    UnsupportedTarget {
        requested: String,
        available: Vec<String>,
    },

    /// The IR contains an element kind no emitter handles.
    #[error("unsupported element kind '{kind}' at {path} (element {index})")]
    UnsupportedElement {
        kind: String,
        /// Index in the top-level `elements` sequence.
        index: usize,
        /// Full path, e.g. `elements[2].children[0]`.
        path: String,
    },

    /// Two files were generated for the same path.
    #[error("file generated twice: {0}")]
    DuplicatePath(String),

    /// A generated path is absolute or escapes the project root.
    #[error("invalid project path: {0}")]
    InvalidPath(String),

    /// Template rendering error.
    #[error("template error: {0}")]
    TemplateError(#[from] handlebars::RenderError),

    /// Invalid template.
    #[error("invalid template: {0}")]
    InvalidTemplate(#[from] handlebars::TemplateError),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
