/*!
 * Core Types
 * Common types used across the supervisor
 */

/// OS process ID type
///
/// Matches the width of `std::process::Child::id()`. For every child this
/// supervisor launches, the pid doubles as the process-group id because each
/// launch places the child in a fresh group of its own.
pub type Pid = u32;

/// Swap counter type
///
/// A swap budget of 0 means unbounded; there is no negative spelling.
pub type SwapCount = u32;
