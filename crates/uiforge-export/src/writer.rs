//! Atomic output writing.
//!
//! Output is staged next to its destination and moved into place only when
//! complete, so a failed run never leaves a partial archive or tree behind.
//! Several staged outputs commit together: if one cannot be moved into
//! place, the ones already committed are removed and whatever they replaced
//! is restored.

use crate::archive::check_root;
use crate::error::{PackagingError, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{Builder, NamedTempFile, TempDir};
use tracing::{info, warn};
use uiforge_codegen::project::is_clean_relative_path;
use uiforge_codegen::ProjectLayout;

const STAGING_PREFIX: &str = ".uiforge-";
const BACKUP_NAME: &str = "previous";

fn check_destination(dest: &Path, overwrite: bool) -> Result<()> {
    if dest.exists() && !overwrite {
        return Err(PackagingError::DestinationExists(dest.to_path_buf()));
    }
    Ok(())
}

fn prepare_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| PackagingError::io(dir, e))
}

fn remove_path(path: &Path) -> std::io::Result<()> {
    if path.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}

enum Staged {
    Archive { file: NamedTempFile, bytes: usize },
    Tree { staging: TempDir, root: PathBuf, files: usize },
}

/// Output written to a staging location, not yet visible at its destination.
///
/// Dropping a `StagedOutput` without committing it discards the staged data.
pub struct StagedOutput {
    dest: PathBuf,
    overwrite: bool,
    staged: Staged,
}

impl std::fmt::Debug for StagedOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StagedOutput")
            .field("dest", &self.dest)
            .field("overwrite", &self.overwrite)
            .finish_non_exhaustive()
    }
}

/// A committed output, with whatever it replaced held aside until the whole
/// batch has succeeded.
struct Committed {
    dest: PathBuf,
    backup: Option<TempDir>,
}

impl Committed {
    fn roll_back(self) {
        if let Err(e) = remove_path(&self.dest) {
            warn!(path = %self.dest.display(), error = %e, "failed to remove committed output");
        }
        if let Some(backup) = &self.backup {
            if let Err(e) = fs::rename(backup.path().join(BACKUP_NAME), &self.dest) {
                warn!(path = %self.dest.display(), error = %e, "failed to restore previous output");
            }
        }
    }
}

impl StagedOutput {
    /// Where the output lands once committed.
    pub fn destination(&self) -> &Path {
        &self.dest
    }

    fn commit(self) -> Result<Committed> {
        let dest = self.dest;
        let backup = if dest.exists() {
            if !self.overwrite {
                return Err(PackagingError::DestinationExists(dest));
            }
            let parent = dest.parent().unwrap_or_else(|| Path::new("."));
            let backup = Builder::new()
                .prefix(STAGING_PREFIX)
                .tempdir_in(parent)
                .map_err(|e| PackagingError::io(parent, e))?;
            fs::rename(&dest, backup.path().join(BACKUP_NAME))
                .map_err(|e| PackagingError::io(&dest, e))?;
            Some(backup)
        } else {
            None
        };

        let moved = match self.staged {
            Staged::Archive { file, bytes } => file
                .persist_noclobber(&dest)
                .map(|_| info!(path = %dest.display(), bytes, "wrote archive"))
                .map_err(|e| {
                    if e.error.kind() == std::io::ErrorKind::AlreadyExists {
                        PackagingError::DestinationExists(dest.clone())
                    } else {
                        PackagingError::io(&dest, e.error)
                    }
                }),
            Staged::Tree {
                staging,
                root,
                files,
            } => {
                let renamed = fs::rename(&root, &dest)
                    .map(|_| info!(path = %dest.display(), files, "wrote project tree"))
                    .map_err(|e| PackagingError::io(&dest, e));
                drop(staging);
                renamed
            }
        };

        if let Err(err) = moved {
            if let Some(backup) = &backup {
                if let Err(e) = fs::rename(backup.path().join(BACKUP_NAME), &dest) {
                    warn!(path = %dest.display(), error = %e, "failed to restore previous output");
                }
            }
            return Err(err);
        }
        Ok(Committed { dest, backup })
    }
}

/// Stage archive bytes for `<dir>/<name>`, creating `dir` if needed.
///
/// The bytes go to a temporary file in `dir`, fully written and synced.
pub fn stage_archive(dir: &Path, name: &str, bytes: &[u8], overwrite: bool) -> Result<StagedOutput> {
    check_root(name)?;
    let dest = dir.join(name);
    check_destination(&dest, overwrite)?;
    prepare_dir(dir)?;

    let mut file: NamedTempFile = Builder::new()
        .prefix(STAGING_PREFIX)
        .tempfile_in(dir)
        .map_err(|e| PackagingError::io(dir, e))?;
    file.write_all(bytes)
        .and_then(|_| file.as_file().sync_all())
        .map_err(|e| PackagingError::io(file.path(), e))?;

    Ok(StagedOutput {
        dest,
        overwrite,
        staged: Staged::Archive {
            file,
            bytes: bytes.len(),
        },
    })
}

/// Stage a layout as an unpacked tree for `<dir>/<root>/`, creating `dir`
/// if needed.
///
/// File contents and relative paths match what the archive would unpack to.
pub fn stage_tree(dir: &Path, layout: &ProjectLayout, overwrite: bool) -> Result<StagedOutput> {
    check_root(layout.root())?;
    let dest = dir.join(layout.root());
    check_destination(&dest, overwrite)?;
    prepare_dir(dir)?;

    let staging = Builder::new()
        .prefix(STAGING_PREFIX)
        .tempdir_in(dir)
        .map_err(|e| PackagingError::io(dir, e))?;
    let root = staging.path().join(layout.root());

    for (path, content) in layout.iter() {
        if !is_clean_relative_path(path) {
            return Err(PackagingError::InvalidPath(path.to_string()));
        }
        let file_path = root.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).map_err(|e| PackagingError::io(parent, e))?;
        }
        fs::write(&file_path, content.as_bytes())
            .map_err(|e| PackagingError::io(&file_path, e))?;
    }
    if layout.is_empty() {
        fs::create_dir_all(&root).map_err(|e| PackagingError::io(&root, e))?;
    }

    Ok(StagedOutput {
        dest,
        overwrite,
        staged: Staged::Tree {
            staging,
            root,
            files: layout.len(),
        },
    })
}

/// Move every staged output into place, all or nothing.
///
/// Destinations are checked before anything moves. If a later output fails,
/// earlier ones are removed and the files they replaced are put back.
pub fn commit_all(outputs: Vec<StagedOutput>) -> Result<Vec<PathBuf>> {
    for output in &outputs {
        check_destination(&output.dest, output.overwrite)?;
    }

    let mut committed: Vec<Committed> = Vec::with_capacity(outputs.len());
    for output in outputs {
        match output.commit() {
            Ok(done) => committed.push(done),
            Err(err) => {
                for done in committed.into_iter().rev() {
                    done.roll_back();
                }
                return Err(err);
            }
        }
    }
    Ok(committed.into_iter().map(|done| done.dest).collect())
}

fn commit_one(output: StagedOutput) -> Result<PathBuf> {
    let mut paths = commit_all(vec![output])?;
    paths
        .pop()
        .ok_or_else(|| PackagingError::InvalidPath("nothing committed".to_string()))
}

/// Write archive bytes to `<dir>/<name>` atomically.
pub fn write_archive(dir: &Path, name: &str, bytes: &[u8], overwrite: bool) -> Result<PathBuf> {
    commit_one(stage_archive(dir, name, bytes, overwrite)?)
}

/// Write a layout as an unpacked tree at `<dir>/<root>/` atomically.
pub fn write_tree(dir: &Path, layout: &ProjectLayout, overwrite: bool) -> Result<PathBuf> {
    commit_one(stage_tree(dir, layout, overwrite)?)
}
