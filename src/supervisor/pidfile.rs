/*!
 * Pid Persistence
 * Records the pinned process id for external hand-off
 */

use crate::core::errors::{PersistError, PersistResult};
use crate::core::types::Pid;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes the pinned pid as decimal text, replacing any previous file
#[derive(Debug, Clone)]
pub struct PidFile {
    path: PathBuf,
}

impl PidFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn persist(&self, pid: Pid) -> PersistResult<()> {
        fs::write(&self.path, pid.to_string()).map_err(|source| PersistError {
            path: self.path.clone(),
            source,
        })
    }
}
