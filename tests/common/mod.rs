/*!
 * Shared Test Support
 * Recording fakes driving the supervisor loop without real processes
 */

use hotswapd::core::errors::{LaunchError, LaunchResult, TerminationResult};
use hotswapd::{Pid, ProcessGroupTerminator, ProcessHandle, ProcessLauncher};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// One observed launcher/terminator interaction, in global order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapEvent {
    /// A launch was attempted for this path
    Launched(String),
    /// This pid's group was asked to terminate
    Terminated(Pid),
}

/// Shared, ordered record of every fake interaction
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<SwapEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: SwapEvent) {
        self.events.lock().unwrap().push(event);
    }

    pub fn snapshot(&self) -> Vec<SwapEvent> {
        self.events.lock().unwrap().clone()
    }
}

/// Launcher fake minting detached handles with sequential fake pids
///
/// Every launch attempt is recorded and announced on the notify channel so
/// tests can synchronize with the loop under a paused clock.
pub struct RecordingLauncher {
    log: EventLog,
    next_pid: Pid,
    fail_paths: Vec<String>,
    notify: UnboundedSender<()>,
}

impl RecordingLauncher {
    pub fn new(log: EventLog, first_pid: Pid) -> (Self, UnboundedReceiver<()>) {
        let (notify, launched) = unbounded_channel();
        (
            Self {
                log,
                next_pid: first_pid,
                fail_paths: Vec::new(),
                notify,
            },
            launched,
        )
    }

    /// Make launches of this path fail
    pub fn failing_on(mut self, path: impl Into<String>) -> Self {
        self.fail_paths.push(path.into());
        self
    }
}

impl ProcessLauncher for RecordingLauncher {
    fn launch(&mut self, path: &str) -> LaunchResult<ProcessHandle> {
        self.log.push(SwapEvent::Launched(path.to_string()));
        let result = if self.fail_paths.iter().any(|p| p == path) {
            Err(LaunchError::Spawn {
                target: path.to_string(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })
        } else {
            let pid = self.next_pid;
            self.next_pid += 1;
            Ok(ProcessHandle::detached(pid))
        };
        let _ = self.notify.send(());
        result
    }
}

/// Terminator fake that records the pid and always succeeds
pub struct RecordingTerminator {
    log: EventLog,
}

impl RecordingTerminator {
    pub fn new(log: EventLog) -> Self {
        Self { log }
    }
}

impl ProcessGroupTerminator for RecordingTerminator {
    fn terminate_group(&mut self, pid: Pid) -> TerminationResult<()> {
        self.log.push(SwapEvent::Terminated(pid));
        Ok(())
    }
}
