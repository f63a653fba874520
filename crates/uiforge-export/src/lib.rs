//! Deterministic packaging for generated uiforge projects.
//!
//! - [`package`] turns a [`ProjectLayout`](uiforge_codegen::ProjectLayout)
//!   into zip bytes that depend on nothing but the layout and the options.
//! - [`write_archive`] and [`write_tree`] put output on disk atomically.
//!   [`stage_archive`], [`stage_tree`] and [`commit_all`] do the same for
//!   several outputs at once.

pub mod archive;
pub mod error;
pub mod writer;

pub use archive::{package, ArchiveOptions};
pub use error::{PackagingError, Result};
pub use writer::{commit_all, stage_archive, stage_tree, write_archive, write_tree, StagedOutput};
