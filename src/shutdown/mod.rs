/*!
 * Shutdown Module
 * Cooperative cancellation driven by OS signals
 */

pub mod coordinator;

// Re-export for convenience
pub use coordinator::{ShutdownCoordinator, ShutdownSignal};
