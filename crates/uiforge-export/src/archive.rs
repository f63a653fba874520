//! Deterministic zip archives.
//!
//! Identical layouts produce identical bytes on every machine. Zip writers
//! normally embed the current time and the host's file modes, so every
//! entry's timestamp, mode and compression settings are pinned here.

use crate::error::{PackagingError, Result};
use std::io::{Cursor, Write};
use tracing::debug;
use uiforge_codegen::project::is_clean_relative_path;
use uiforge_codegen::ProjectLayout;
use zip::write::{FileOptions, ZipWriter};
use zip::{CompressionMethod, DateTime};

/// Archive settings. All entries share them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveOptions {
    /// Deflate level 1-9; 0 stores entries uncompressed.
    pub compression_level: u8,
    /// Unix permission bits recorded for every file.
    pub unix_mode: u32,
}

impl Default for ArchiveOptions {
    fn default() -> Self {
        Self {
            compression_level: 6,
            unix_mode: 0o644,
        }
    }
}

impl ArchiveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the compression level, clamped to 0-9.
    pub fn compression_level(mut self, level: u8) -> Self {
        self.compression_level = level.min(9);
        self
    }

    pub fn unix_mode(mut self, mode: u32) -> Self {
        self.unix_mode = mode & 0o777;
        self
    }

    fn file_options(&self) -> FileOptions<'static, ()> {
        let options = FileOptions::default()
            .last_modified_time(DateTime::default())
            .unix_permissions(self.unix_mode);
        if self.compression_level == 0 {
            options.compression_method(CompressionMethod::Stored)
        } else {
            options
                .compression_method(CompressionMethod::Deflated)
                .compression_level(Some(i64::from(self.compression_level)))
        }
    }
}

/// Check that a project root is one plain directory name.
pub(crate) fn check_root(root: &str) -> Result<()> {
    if root.contains('/') || !is_clean_relative_path(root) {
        return Err(PackagingError::InvalidPath(root.to_string()));
    }
    Ok(())
}

/// Pack a layout into zip bytes.
///
/// Every member is stored as `<root>/<path>` in lexicographic path order.
/// No directory entries are written.
pub fn package(layout: &ProjectLayout, options: &ArchiveOptions) -> Result<Vec<u8>> {
    check_root(layout.root())?;

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let file_options = options.file_options();

    let mut paths: Vec<&str> = layout.paths().collect();
    paths.sort_unstable();

    for path in paths {
        if !is_clean_relative_path(path) {
            return Err(PackagingError::InvalidPath(path.to_string()));
        }
        let content = layout
            .get(path)
            .ok_or_else(|| PackagingError::InvalidPath(path.to_string()))?;
        zip.start_file(format!("{}/{}", layout.root(), path), file_options.clone())?;
        zip.write_all(content.as_bytes())
            .map_err(|e| PackagingError::io(path, e))?;
    }

    let bytes = zip.finish()?.into_inner();
    debug!(
        root = layout.root(),
        entries = layout.len(),
        bytes = bytes.len(),
        "packaged archive"
    );
    Ok(bytes)
}
