//! In-memory project trees produced by emitters and the assembler.

use crate::error::{CodegenError, Result};
use indexmap::IndexMap;

/// Contents of one generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    Text(String),
    Binary(Vec<u8>),
}

impl FileContent {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            FileContent::Text(s) => s.as_bytes(),
            FileContent::Binary(b) => b,
        }
    }

    /// Text contents, or `None` for binary files.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FileContent::Text(s) => Some(s),
            FileContent::Binary(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<String> for FileContent {
    fn from(s: String) -> Self {
        FileContent::Text(s)
    }
}

impl From<&str> for FileContent {
    fn from(s: &str) -> Self {
        FileContent::Text(s.to_string())
    }
}

impl From<Vec<u8>> for FileContent {
    fn from(b: Vec<u8>) -> Self {
        FileContent::Binary(b)
    }
}

/// Whether `path` is a clean relative path: `/`-separated, no empty,
/// `.` or `..` segments, no backslashes.
pub fn is_clean_relative_path(path: &str) -> bool {
    !path.is_empty()
        && !path.contains('\\')
        && path
            .split('/')
            .all(|segment| !segment.is_empty() && segment != "." && segment != "..")
}

/// Files produced by one emitter, keyed by relative path in emission order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectTree {
    files: IndexMap<String, FileContent>,
}

impl ProjectTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file. Paths must be clean and unique within the tree.
    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<FileContent>) -> Result<()> {
        let path = path.into();
        if !is_clean_relative_path(&path) {
            return Err(CodegenError::InvalidPath(path));
        }
        if self.files.contains_key(&path) {
            return Err(CodegenError::DuplicatePath(path));
        }
        self.files.insert(path, content.into());
        Ok(())
    }

    pub fn get(&self, path: &str) -> Option<&FileContent> {
        self.files.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FileContent)> {
        self.files.iter().map(|(p, c)| (p.as_str(), c))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub(crate) fn into_files(self) -> IndexMap<String, FileContent> {
        self.files
    }
}

/// A finalized project: every file under one root directory, sorted by path.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectLayout {
    root: String,
    target: String,
    files: IndexMap<String, FileContent>,
}

impl ProjectLayout {
    /// Build a layout; files are re-sorted lexicographically by path.
    pub fn new(
        root: impl Into<String>,
        target: impl Into<String>,
        mut files: IndexMap<String, FileContent>,
    ) -> Self {
        files.sort_keys();
        Self {
            root: root.into(),
            target: target.into(),
            files,
        }
    }

    /// Name of the project's root directory (`<screen-slug>-<target>`).
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Identifier of the target this project was generated for.
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn get(&self, path: &str) -> Option<&FileContent> {
        self.files.get(path)
    }

    /// Text of a file, if it exists and is text.
    pub fn text(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(FileContent::as_text)
    }

    /// Relative paths in lexicographic order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    /// Files in lexicographic path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FileContent)> {
        self.files.iter().map(|(p, c)| (p.as_str(), c))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Sum of all file sizes in bytes.
    pub fn total_bytes(&self) -> usize {
        self.files.values().map(FileContent::len).sum()
    }
}
