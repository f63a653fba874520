//! Error taxonomy of a generation run.

use thiserror::Error;
use uiforge_codegen::CodegenError;
use uiforge_export::PackagingError;
use uiforge_ir::ValidationError;

/// Result type alias for generation runs.
pub type Result<T> = std::result::Result<T, GenerateError>;

/// Everything a generation run can fail with.
///
/// Every variant except `Packaging` and `Input` is raised before any output
/// is written.
#[derive(Error, Debug)]
pub enum GenerateError {
    /// The IR source could not be read.
    #[error("failed to read IR from {name}: {source}")]
    Input {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// Malformed or incomplete IR; every violation is listed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("unsupported target '{}' (available: {})", .requested, .available.join(", "))]
    UnsupportedTarget {
        requested: String,
        available: Vec<String>,
    },

    #[error("unsupported element kind '{kind}' at {path} (element {index})")]
    UnsupportedElement {
        kind: String,
        index: usize,
        path: String,
    },

    /// Writing the archive or tree failed. Not retried.
    #[error(transparent)]
    Packaging(#[from] PackagingError),

    /// An engine bug, such as output that differs between two renders.
    #[error("internal invariant violated: {0}")]
    InternalInvariant(String),
}

impl GenerateError {
    /// Process exit code for the CLI.
    pub fn exit_code(&self) -> u8 {
        match self {
            GenerateError::Validation(_) => 2,
            GenerateError::UnsupportedTarget { .. } => 3,
            GenerateError::UnsupportedElement { .. } => 4,
            GenerateError::Packaging(_) | GenerateError::Input { .. } => 5,
            GenerateError::InternalInvariant(_) => 70,
        }
    }
}

impl From<CodegenError> for GenerateError {
    fn from(err: CodegenError) -> Self {
        match err {
            CodegenError::UnsupportedTarget {
                requested,
                available,
            } => GenerateError::UnsupportedTarget {
                requested,
                available,
            },
            CodegenError::UnsupportedElement { kind, index, path } => {
                GenerateError::UnsupportedElement { kind, index, path }
            }
            // Templates and paths are fixed by the emitters, so these only
            // fail on an engine bug.
            other => GenerateError::InternalInvariant(other.to_string()),
        }
    }
}
