/*!
 * Process Terminator
 * Signal delivery to whole process groups
 */

use crate::core::errors::{TerminationError, TerminationResult};
use crate::core::types::Pid;
use log::info;
#[cfg(unix)]
use nix::sys::signal::Signal;

/// Termination strategy for superseded process groups
#[cfg_attr(test, mockall::automock)]
pub trait ProcessGroupTerminator: Send {
    /// Deliver the termination signal to the whole group led by `pid`
    fn terminate_group(&mut self, pid: Pid) -> TerminationResult<()>;
}

/// Resolves a pid's group and signals it, SIGTERM by default
#[derive(Debug, Clone)]
pub struct SignalTerminator {
    #[cfg(unix)]
    signal: Signal,
}

impl SignalTerminator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            #[cfg(unix)]
            signal: Signal::SIGTERM,
        }
    }

    /// Deliver a different signal than SIGTERM
    #[cfg(unix)]
    #[inline]
    #[must_use]
    pub fn with_signal(mut self, signal: Signal) -> Self {
        self.signal = signal;
        self
    }
}

impl Default for SignalTerminator {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessGroupTerminator for SignalTerminator {
    fn terminate_group(&mut self, pid: Pid) -> TerminationResult<()> {
        #[cfg(unix)]
        {
            use nix::sys::signal::killpg;
            use nix::unistd::{getpgid, Pid as NixPid};

            let target = NixPid::from_raw(pid as i32);
            // Lookup first: a vanished leader means there is nothing to signal
            let pgid = getpgid(Some(target)).map_err(|errno| TerminationError::GroupLookup {
                pid,
                source: std::io::Error::from(errno),
            })?;

            killpg(pgid, self.signal).map_err(|errno| TerminationError::Signal {
                pgid: pgid.as_raw() as Pid,
                source: std::io::Error::from(errno),
            })?;

            info!("Sent {} to process group {}", self.signal.as_str(), pgid);
            Ok(())
        }
        #[cfg(not(unix))]
        {
            let _ = pid;
            log::warn!("Process-group termination not supported on this platform");
            Err(TerminationError::Unsupported)
        }
    }
}
