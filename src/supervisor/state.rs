/*!
 * Supervisor State
 * Loop state, lifecycle phases, and the terminal outcome snapshot
 */

use crate::core::types::{Pid, SwapCount};
use crate::pointer::Pointer;
use crate::process::ProcessHandle;
use serde::{Deserialize, Serialize};

/// Lifecycle phase of the control loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupervisorPhase {
    /// Polling the pointer and swapping on change
    Running,
    /// Swap budget exhausted; pinned to the final process
    Draining,
    /// Shutdown signal observed
    ShuttingDown,
}

/// Mutable loop state
///
/// Owned by the control task alone; never shared across tasks.
#[derive(Debug)]
pub struct SupervisorState {
    pub current: Pointer,
    pub active: Option<ProcessHandle>,
    pub condemned: Vec<ProcessHandle>,
    pub swap_count: SwapCount,
    pub phase: SupervisorPhase,
    pub polls: u64,
    pub poll_failures: u64,
}

impl SupervisorState {
    #[must_use]
    pub fn new(current: Pointer, active: Option<ProcessHandle>) -> Self {
        Self {
            current,
            active,
            condemned: Vec::new(),
            swap_count: 0,
            phase: SupervisorPhase::Running,
            polls: 0,
            poll_failures: 0,
        }
    }

    /// Reap condemned children that have exited since the last pass
    pub fn reap_condemned(&mut self) {
        self.condemned.retain_mut(|handle| !handle.try_reap());
    }

    /// Snapshot the terminal state
    ///
    /// The pinned pid is only reported from `Draining`; in every other phase
    /// no process outlives the supervisor's management.
    #[must_use]
    pub fn outcome(&self) -> SupervisorOutcome {
        SupervisorOutcome {
            phase: self.phase,
            swaps_performed: self.swap_count,
            pinned_pid: if self.phase == SupervisorPhase::Draining {
                self.active.as_ref().map(ProcessHandle::pid)
            } else {
                None
            },
            polls: self.polls,
            poll_failures: self.poll_failures,
        }
    }
}

/// Terminal snapshot returned by the control loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SupervisorOutcome {
    pub phase: SupervisorPhase,
    pub swaps_performed: SwapCount,
    pub pinned_pid: Option<Pid>,
    pub polls: u64,
    pub poll_failures: u64,
}
