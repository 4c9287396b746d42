/*!
 * Pointer Reader
 * Single-line `<hash> <path>` pointer file parsing and loading
 */

use crate::core::errors::{PointerError, PointerResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Identity of the binary that should currently be running
///
/// The hash is an opaque token compared only for equality; the path is
/// handed to the launcher verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Pointer {
    pub hash: String,
    pub path: String,
}

impl Pointer {
    #[must_use]
    pub fn new(hash: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            path: path.into(),
        }
    }

    /// Parse pointer file contents
    ///
    /// The first whitespace character splits hash from path; the path keeps
    /// interior whitespace but is trimmed at both ends, which absorbs both
    /// multi-space separators and the trailing newline. Both fields must be
    /// non-empty.
    pub fn parse(raw: &str) -> PointerResult<Self> {
        let mut parts = raw.splitn(2, char::is_whitespace);
        let hash = parts.next().unwrap_or_default();
        let path = parts.next().map(str::trim).unwrap_or_default();

        if hash.is_empty() {
            return Err(PointerError::Malformed("empty hash field".to_string()));
        }
        if path.is_empty() {
            return Err(PointerError::Malformed(format!(
                "missing path after hash {hash:?}"
            )));
        }

        Ok(Self::new(hash, path))
    }
}

/// Reads and parses the pointer file on demand
///
/// Stateless between reads; the supervisor owns the last-seen hash and
/// decides what a change means.
#[derive(Debug, Clone)]
pub struct PointerReader {
    path: PathBuf,
}

impl PointerReader {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path this reader watches
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the current pointer
    ///
    /// No retry on failure; the caller's next poll is the retry.
    pub fn read(&self) -> PointerResult<Pointer> {
        let raw = fs::read_to_string(&self.path).map_err(|source| PointerError::Io {
            path: self.path.clone(),
            source,
        })?;
        Pointer::parse(&raw)
    }
}
