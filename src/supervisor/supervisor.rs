/*!
 * Swap Supervisor
 * The single control loop: poll, compare, terminate, relaunch
 */

use crate::core::errors::SupervisorResult;
use crate::core::limits::DRAIN_CHANNEL_CAPACITY;
use crate::pointer::{Pointer, PointerReader};
use crate::process::{ProcessGroupTerminator, ProcessHandle, ProcessLauncher};
use crate::shutdown::ShutdownSignal;
use crate::supervisor::config::SupervisorConfig;
use crate::supervisor::pidfile::PidFile;
use crate::supervisor::state::{SupervisorOutcome, SupervisorPhase, SupervisorState};
use log::{error, info, warn};
use tokio::sync::mpsc;
use tokio::time::{self, MissedTickBehavior};

/// Drives the poll/compare/swap cycle until budget exhaustion or shutdown
///
/// All state lives on this one control task; the launcher and terminator are
/// trait objects so tests run the loop against fakes.
pub struct SwapSupervisor {
    config: SupervisorConfig,
    reader: PointerReader,
    pid_file: PidFile,
    launcher: Box<dyn ProcessLauncher>,
    terminator: Box<dyn ProcessGroupTerminator>,
    shutdown: ShutdownSignal,
}

impl SwapSupervisor {
    #[must_use]
    pub fn new(
        config: SupervisorConfig,
        launcher: Box<dyn ProcessLauncher>,
        terminator: Box<dyn ProcessGroupTerminator>,
        shutdown: ShutdownSignal,
    ) -> Self {
        let reader = PointerReader::new(config.pointer_file.clone());
        let pid_file = PidFile::new(config.pid_file.clone());
        Self {
            config,
            reader,
            pid_file,
            launcher,
            terminator,
            shutdown,
        }
    }

    /// Run until shutdown or budget exhaustion
    ///
    /// The initial pointer read and initial launch are fatal on failure;
    /// every failure after that is logged and survived, with the previous
    /// process left authoritative.
    pub async fn run(mut self) -> SupervisorResult<SupervisorOutcome> {
        let current = self.reader.read()?;
        info!(
            "Supervising {} (hash {})",
            current.path, current.hash
        );
        let active = Some(self.launcher.launch(&current.path)?);
        let mut state = SupervisorState::new(current, active);

        let (drain_tx, mut drain_rx) = mpsc::channel::<()>(DRAIN_CHANNEL_CAPACITY);
        let mut shutdown = self.shutdown.clone();

        let mut ticker = time::interval_at(
            time::Instant::now() + self.config.poll_interval,
            self.config.poll_interval,
        );
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;

                _ = shutdown.cancelled() => {
                    self.handle_shutdown(&mut state);
                    break;
                }
                _ = drain_rx.recv() => {
                    self.handle_drain(&mut state);
                    break;
                }
                _ = ticker.tick() => {
                    self.handle_tick(&mut state, &drain_tx);
                }
            }
        }

        state.reap_condemned();
        Ok(state.outcome())
    }

    /// One poll: reap, read, compare, maybe swap
    fn handle_tick(&mut self, state: &mut SupervisorState, drain_tx: &mpsc::Sender<()>) {
        state.reap_condemned();
        state.polls += 1;

        let pointer = match self.reader.read() {
            Ok(pointer) => pointer,
            Err(e) => {
                state.poll_failures += 1;
                warn!("Pointer poll failed: {}", e);
                return;
            }
        };

        // The hash is the sole trigger; a new path under the same hash is
        // not a change
        if pointer.hash == state.current.hash {
            return;
        }

        info!(
            "Hash changed {} -> {}, swapping to {}",
            state.current.hash, pointer.hash, pointer.path
        );
        self.swap(state, pointer);

        if self.config.swap_budget > 0 && state.swap_count >= self.config.swap_budget {
            // Buffered; a full buffer means the event is already pending
            let _ = drain_tx.try_send(());
        }
    }

    /// Replace the active process: old group down, then the new one up
    fn swap(&mut self, state: &mut SupervisorState, pointer: Pointer) {
        if let Some(handle) = state.active.take() {
            self.condemn(state, handle);
        }

        match self.launcher.launch(&pointer.path) {
            Ok(handle) => {
                info!("Swapped to {} (pid {})", pointer.path, handle.pid());
                state.active = Some(handle);
            }
            Err(e) => {
                error!("Failed to launch {}: {}", pointer.path, e);
                state.active = None;
            }
        }

        // Pointer and count advance even on a failed launch; the next
        // attempt waits for the next hash change
        state.current = pointer;
        state.swap_count += 1;
    }

    /// Signal a handle's group and park it for reaping
    fn condemn(&mut self, state: &mut SupervisorState, mut handle: ProcessHandle) {
        if let Err(e) = self.terminator.terminate_group(handle.pid()) {
            warn!("Failed to terminate process group {}: {}", handle.pid(), e);
        }
        if !handle.try_reap() {
            state.condemned.push(handle);
        }
    }

    /// Budget exhausted: record the pinned pid and stop managing
    fn handle_drain(&mut self, state: &mut SupervisorState) {
        state.phase = SupervisorPhase::Draining;
        match state.active.as_ref() {
            Some(handle) => {
                info!(
                    "Swap budget of {} exhausted; pinning pid {} and draining",
                    self.config.swap_budget,
                    handle.pid()
                );
                if let Err(e) = self.pid_file.persist(handle.pid()) {
                    error!("{}", e);
                }
            }
            None => {
                warn!("Swap budget exhausted with no live process; skipping pid file");
            }
        }
    }

    /// Shutdown signal observed: take the active group down and stop
    fn handle_shutdown(&mut self, state: &mut SupervisorState) {
        state.phase = SupervisorPhase::ShuttingDown;
        info!("Shutting down; terminating active process group");
        if let Some(handle) = state.active.take() {
            self.condemn(state, handle);
        }
    }
}
