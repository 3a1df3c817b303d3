//! The ordered search-path list seeded with the root and grown by the
//! bootstrap file.

use std::ops::Index;
use std::path::{Path, PathBuf};
use std::slice;

use serde::Serialize;

/// Ordered list of directories for later config discovery.
///
/// Append-only: the bootstrap file can add entries but never remove or
/// reorder them. Entries are stored verbatim, duplicates included. Earlier
/// entries have higher priority for consumers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SearchPaths {
    paths: Vec<PathBuf>,
}

impl SearchPaths {
    /// A list holding only `root`.
    pub fn seeded(root: impl Into<PathBuf>) -> Self {
        Self {
            paths: vec![root.into()],
        }
    }

    pub fn append(&mut self, path: impl Into<PathBuf>) {
        self.paths.push(path.into());
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Path> {
        self.paths.get(index).map(PathBuf::as_path)
    }

    pub fn first(&self) -> Option<&Path> {
        self.get(0)
    }

    pub fn iter(&self) -> slice::Iter<'_, PathBuf> {
        self.paths.iter()
    }

    pub fn as_slice(&self) -> &[PathBuf] {
        &self.paths
    }
}

impl Index<usize> for SearchPaths {
    type Output = Path;

    fn index(&self, index: usize) -> &Path {
        &self.paths[index]
    }
}

impl<'a> IntoIterator for &'a SearchPaths {
    type Item = &'a PathBuf;
    type IntoIter = slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
