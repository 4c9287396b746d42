/*!
 * Supervisor Limits and Defaults
 *
 * Centralized location for the supervisor's defaults and magic numbers.
 * Organized by domain for maintainability and discoverability.
 */

use crate::core::types::SwapCount;
use std::time::Duration;

// =============================================================================
// POLLING
// =============================================================================

/// Default pointer poll interval (5 seconds)
/// Matches the cadence at which external deploy pipelines rewrite the pointer
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

// =============================================================================
// FILE LOCATIONS
// =============================================================================

/// Default pointer file location (relative to the supervisor's working directory)
pub const DEFAULT_POINTER_FILE: &str = "./config/hash_binary.txt";

/// Default pid file written when the swap budget is exhausted
pub const DEFAULT_PID_FILE: &str = "current_pid.txt";

// =============================================================================
// CONTROL LOOP
// =============================================================================

/// Default swap budget (0 = unbounded)
pub const DEFAULT_SWAP_BUDGET: SwapCount = 0;

/// Budget-exhaustion channel capacity
/// One slot is enough: at most one drain event is emitted per supervisor run,
/// and a buffered send keeps the tick handler from ever blocking on itself
pub const DRAIN_CHANNEL_CAPACITY: usize = 1;
