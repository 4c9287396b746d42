/*!
 * Process Module
 * Child launching, handle tracking, and process-group termination
 */

pub mod handle;
pub mod launcher;
pub mod terminator;

// Re-export for convenience
pub use handle::ProcessHandle;
pub use launcher::{CommandLauncher, ProcessLauncher};
pub use terminator::{ProcessGroupTerminator, SignalTerminator};
