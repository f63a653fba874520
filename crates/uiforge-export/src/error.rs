//! Packaging errors.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for packaging operations.
pub type Result<T> = std::result::Result<T, PackagingError>;

/// Failures while building an archive or writing output to disk.
///
/// I/O failures carry the path and the underlying cause. Nothing here is
/// retried; that decision belongs to the caller.
#[derive(Error, Debug)]
pub enum PackagingError {
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// The destination exists and overwriting was not requested.
    #[error("destination already exists: {}", .0.display())]
    DestinationExists(PathBuf),

    /// A project root or file path that cannot be written safely.
    #[error("invalid output path: {0}")]
    InvalidPath(String),
}

impl PackagingError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PackagingError::Io {
            path: path.into(),
            source,
        }
    }
}
