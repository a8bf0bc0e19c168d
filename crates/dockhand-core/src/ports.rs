// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdapterError {
    Io {
        op: &'static str,
        path: PathBuf,
        detail: String,
    },
}

impl std::fmt::Display for AdapterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { op, path, detail } => {
                write!(f, "io error: {op} {} ({detail})", path.display())
            }
        }
    }
}

impl std::error::Error for AdapterError {}

/// Read-only filesystem access for the build-context checks. Relative
/// `path` arguments resolve against `root`; absolute paths pass through.
/// The engine never writes.
pub trait Fs {
    fn read_text(&self, root: &Path, path: &Path) -> Result<String, AdapterError>;
    fn exists(&self, root: &Path, path: &Path) -> bool;
    fn is_file(&self, root: &Path, path: &Path) -> bool;
    fn file_size(&self, root: &Path, path: &Path) -> Result<u64, AdapterError>;
}
