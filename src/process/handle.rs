/*!
 * Process Handle
 * Tracks a launched child and its process group
 */

use crate::core::types::Pid;
use log::{info, warn};
use std::process::Child;

/// A launched child process
///
/// The pid doubles as the process group id because every child is launched
/// as its own group leader. The `Child` is kept so the process table entry
/// can be reaped after the group exits; handles built with [`detached`]
/// carry only the pid.
///
/// [`detached`]: ProcessHandle::detached
#[derive(Debug)]
pub struct ProcessHandle {
    pid: Pid,
    child: Option<Child>,
}

impl ProcessHandle {
    /// Wrap a freshly spawned child
    #[must_use]
    pub fn spawned(child: Child) -> Self {
        let pid = child.id();
        Self {
            pid,
            child: Some(child),
        }
    }

    /// Track a process by pid alone, with nothing to reap
    #[must_use]
    pub fn detached(pid: Pid) -> Self {
        Self { pid, child: None }
    }

    /// OS process id (and process group id) of the child
    #[inline]
    #[must_use]
    pub fn pid(&self) -> Pid {
        self.pid
    }

    /// Attempt to reap the child without blocking
    ///
    /// Returns true once the process has exited and its table entry is
    /// released. Detached handles count as already reaped.
    pub fn try_reap(&mut self) -> bool {
        let Some(child) = self.child.as_mut() else {
            return true;
        };
        match child.try_wait() {
            Ok(Some(status)) => {
                info!("Process {} exited with status: {}", self.pid, status);
                self.child = None;
                true
            }
            Ok(None) => false,
            Err(e) => {
                warn!("Failed to poll process {}: {}", self.pid, e);
                // Poll errors are not retried
                self.child = None;
                true
            }
        }
    }
}
