/*!
 * Hotswapd Library
 * Hash-triggered process swapping exposed as a library
 */

pub mod core;
pub mod monitoring;
pub mod pointer;
pub mod process;
pub mod shutdown;
pub mod supervisor;

// Re-exports
pub use crate::core::errors::*;
pub use crate::core::types::{Pid, SwapCount};
pub use monitoring::init_tracing;
pub use pointer::{Pointer, PointerReader};
pub use process::{
    CommandLauncher, ProcessGroupTerminator, ProcessHandle, ProcessLauncher, SignalTerminator,
};
pub use shutdown::{ShutdownCoordinator, ShutdownSignal};
pub use supervisor::{SupervisorConfig, SupervisorOutcome, SupervisorPhase, SwapSupervisor};
