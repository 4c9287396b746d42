/*!
 * Supervisor Module
 * The swap state machine, its config, and pid persistence
 */

pub mod config;
pub mod pidfile;
pub mod state;
pub mod supervisor;

// Re-export for convenience
pub use config::SupervisorConfig;
pub use pidfile::PidFile;
pub use state::{SupervisorOutcome, SupervisorPhase, SupervisorState};
pub use supervisor::SwapSupervisor;
