//! `dockhand-adapters` binds the engine's filesystem port to the real OS.
//!
//! Boundary: this crate owns every `std::fs` call made on behalf of the
//! engine. `dockhand-core` stays free of ambient filesystem access and the
//! CLI hands a [`RealFs`] in at the edge.

#![forbid(unsafe_code)]

use std::fs;
use std::path::{Path, PathBuf};

use dockhand_core::ports::{AdapterError, Fs};

fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

/// Filesystem port backed by `std::fs`.
#[derive(Debug, Default)]
pub struct RealFs;

impl Fs for RealFs {
    fn read_text(&self, root: &Path, path: &Path) -> Result<String, AdapterError> {
        let target = resolve(root, path);
        fs::read_to_string(&target).map_err(|err| AdapterError::Io {
            op: "read_to_string",
            path: target,
            detail: err.to_string(),
        })
    }

    fn exists(&self, root: &Path, path: &Path) -> bool {
        resolve(root, path).exists()
    }

    fn is_file(&self, root: &Path, path: &Path) -> bool {
        resolve(root, path).is_file()
    }

    fn file_size(&self, root: &Path, path: &Path) -> Result<u64, AdapterError> {
        let target = resolve(root, path);
        let metadata = fs::metadata(&target).map_err(|err| AdapterError::Io {
            op: "metadata",
            path: target,
            detail: err.to_string(),
        })?;
        Ok(metadata.len())
    }
}
