/*!
 * Supervisor Config
 * Tunables for the swap loop
 */

use crate::core::limits::{
    DEFAULT_PID_FILE, DEFAULT_POINTER_FILE, DEFAULT_POLL_INTERVAL, DEFAULT_SWAP_BUDGET,
};
use crate::core::types::SwapCount;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Supervisor tunables
///
/// A `swap_budget` of 0 means unbounded swaps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SupervisorConfig {
    pub pointer_file: PathBuf,
    pub pid_file: PathBuf,
    pub poll_interval: Duration,
    pub swap_budget: SwapCount,
    pub runner: Option<String>,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            pointer_file: PathBuf::from(DEFAULT_POINTER_FILE),
            pid_file: PathBuf::from(DEFAULT_PID_FILE),
            poll_interval: DEFAULT_POLL_INTERVAL,
            swap_budget: DEFAULT_SWAP_BUDGET,
            runner: None,
        }
    }
}

impl SupervisorConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn with_pointer_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.pointer_file = path.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_pid_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.pid_file = path.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_swap_budget(mut self, budget: SwapCount) -> Self {
        self.swap_budget = budget;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_runner(mut self, runner: impl Into<String>) -> Self {
        self.runner = Some(runner.into());
        self
    }
}
