// SPDX-License-Identifier: Apache-2.0
//! In-memory `Fs` fakes for engine and check tests.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::ports::{AdapterError, Fs};

#[derive(Debug)]
struct FileEntry {
    content: Option<String>,
    size: u64,
}

/// `Fs` backed by a path map. Relative lookups resolve against the `root`
/// argument the same way the real adapter resolves them.
#[derive(Debug, Default)]
pub(crate) struct MapFs {
    files: BTreeMap<PathBuf, FileEntry>,
}

impl MapFs {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_text(mut self, path: &str, content: &str) -> Self {
        self.files.insert(
            PathBuf::from(path),
            FileEntry {
                size: content.len() as u64,
                content: Some(content.to_string()),
            },
        );
        self
    }

    /// A file that exists with a size but cannot be read as text.
    pub(crate) fn with_sized(mut self, path: &str, size: u64) -> Self {
        self.files
            .insert(PathBuf::from(path), FileEntry { content: None, size });
        self
    }

    fn resolve(root: &Path, path: &Path) -> PathBuf {
        let joined = if path.is_absolute() {
            path.to_path_buf()
        } else {
            root.join(path)
        };
        // `.`-rooted lookups must hit the same keys as bare ones.
        joined
            .components()
            .filter(|c| !matches!(c, std::path::Component::CurDir))
            .collect()
    }
}

impl Fs for MapFs {
    fn read_text(&self, root: &Path, path: &Path) -> Result<String, AdapterError> {
        let resolved = Self::resolve(root, path);
        match self.files.get(&resolved).and_then(|e| e.content.clone()) {
            Some(content) => Ok(content),
            None => Err(AdapterError::Io {
                op: "read_to_string",
                path: resolved,
                detail: "not readable".to_string(),
            }),
        }
    }

    fn exists(&self, root: &Path, path: &Path) -> bool {
        self.files.contains_key(&Self::resolve(root, path))
    }

    fn is_file(&self, root: &Path, path: &Path) -> bool {
        self.files.contains_key(&Self::resolve(root, path))
    }

    fn file_size(&self, root: &Path, path: &Path) -> Result<u64, AdapterError> {
        let resolved = Self::resolve(root, path);
        self.files
            .get(&resolved)
            .map(|e| e.size)
            .ok_or_else(|| AdapterError::Io {
                op: "metadata",
                path: resolved.clone(),
                detail: "missing".to_string(),
            })
    }
}

/// `Fs` over nothing, for pure-text analysis.
#[derive(Debug, Default)]
pub(crate) struct EmptyFs;

impl Fs for EmptyFs {
    fn read_text(&self, _root: &Path, path: &Path) -> Result<String, AdapterError> {
        Err(AdapterError::Io {
            op: "read_to_string",
            path: path.to_path_buf(),
            detail: "empty filesystem".to_string(),
        })
    }

    fn exists(&self, _root: &Path, _path: &Path) -> bool {
        false
    }

    fn is_file(&self, _root: &Path, _path: &Path) -> bool {
        false
    }

    fn file_size(&self, _root: &Path, path: &Path) -> Result<u64, AdapterError> {
        Err(AdapterError::Io {
            op: "metadata",
            path: path.to_path_buf(),
            detail: "empty filesystem".to_string(),
        })
    }
}
