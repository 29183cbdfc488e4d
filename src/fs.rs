//! Directory trees as an expansion.
//!
//! A directory's children are its entries; anything that is not a directory
//! has none. Unreadable directories surface as [`WalkError::ReadDir`] and the
//! walk carries on with their siblings.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::expand::Expand;
use crate::walker::{TryWalk, Walker};
use crate::WalkError;

/// Configuration for listing directory entries.
#[derive(Debug, Clone, Default)]
pub struct DirExpansion {
    /// Include entries whose name starts with `.`
    pub include_hidden: bool,
    /// Descend into symlinked directories
    pub follow_links: bool,
    /// Sort each directory's entries by path
    pub sorted: bool,
}

impl DirExpansion {
    /// Default listing: hidden entries skipped, links not followed, unsorted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Include hidden entries.
    pub fn with_hidden(mut self, enabled: bool) -> Self {
        self.include_hidden = enabled;
        self
    }

    /// Descend into symlinked directories.
    ///
    /// Cycles through links are not detected.
    pub fn with_follow_links(mut self, enabled: bool) -> Self {
        self.follow_links = enabled;
        self
    }

    /// Sort entries within each directory.
    pub fn with_sorted(mut self, enabled: bool) -> Self {
        self.sorted = enabled;
        self
    }

    fn is_expandable(&self, path: &Path) -> Result<bool, WalkError> {
        let metadata = if self.follow_links {
            fs::metadata(path)
        } else {
            fs::symlink_metadata(path)
        };
        match metadata {
            Ok(metadata) => Ok(metadata.is_dir()),
            Err(source) => Err(WalkError::Metadata {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    fn is_visible(&self, path: &Path) -> bool {
        self.include_hidden
            || !path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with('.'))
    }

    /// List the direct children of `path`.
    pub fn children(&self, path: &Path) -> Result<Vec<PathBuf>, WalkError> {
        if !self.is_expandable(path)? {
            return Ok(Vec::new());
        }

        let read_dir_err = |source| WalkError::ReadDir {
            path: path.to_path_buf(),
            source,
        };
        let mut entries = Vec::new();
        for entry in fs::read_dir(path).map_err(read_dir_err)? {
            let entry_path = entry.map_err(read_dir_err)?.path();
            if self.is_visible(&entry_path) {
                entries.push(entry_path);
            }
        }
        if self.sorted {
            entries.sort();
        }

        trace!(path = %path.display(), entries = entries.len(), "listed directory");
        Ok(entries)
    }
}

impl Expand<PathBuf> for DirExpansion {
    type Children = std::vec::IntoIter<PathBuf>;
    type Error = WalkError;

    fn expand(&self, node: &PathBuf) -> Result<Self::Children, Self::Error> {
        self.children(node).map(Vec::into_iter)
    }
}

/// Walk the directory tree under `root`, `root` itself first.
pub fn walk_dir(root: impl Into<PathBuf>, config: DirExpansion) -> TryWalk<PathBuf, DirExpansion> {
    Walker::from_node(root.into(), config).into_results()
}
