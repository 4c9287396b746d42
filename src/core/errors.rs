/*!
 * Error Types
 * Centralized error handling with thiserror and miette support
 */

use crate::core::types::Pid;
use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Pointer file errors
#[derive(Error, Debug, Diagnostic)]
pub enum PointerError {
    #[error("pointer file {} unreadable: {source}", path.display())]
    #[diagnostic(
        code(pointer::io),
        help("Check that the pointer file exists and is readable by the supervisor.")
    )]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed pointer file: {0}")]
    #[diagnostic(
        code(pointer::malformed),
        help("Expected a single `<hash> <path>` line with both fields non-empty.")
    )]
    Malformed(String),
}

/// Pointer operation result
pub type PointerResult<T> = std::result::Result<T, PointerError>;

/// Launch errors
#[derive(Error, Debug, Diagnostic)]
pub enum LaunchError {
    #[error("failed to launch {target}: {source}")]
    #[diagnostic(
        code(launch::spawn),
        help("Check the target path, its permissions, and its exec format.")
    )]
    Spawn {
        target: String,
        #[source]
        source: std::io::Error,
    },

    #[error("runner command is empty")]
    #[diagnostic(
        code(launch::invalid_runner),
        help("Provide a non-empty runner command, or unset it to execute targets directly.")
    )]
    InvalidRunner,

    #[error("process launching is not supported on this platform")]
    #[diagnostic(
        code(launch::unsupported),
        help("hotswapd requires a Unix process model for process-group placement.")
    )]
    Unsupported,
}

/// Launch operation result
pub type LaunchResult<T> = std::result::Result<T, LaunchError>;

/// Termination errors
#[derive(Error, Debug, Diagnostic)]
pub enum TerminationError {
    #[error("process group lookup failed for pid {pid}: {source}")]
    #[diagnostic(
        code(terminate::group_lookup),
        help("The process has likely already exited; there is nothing left to signal.")
    )]
    GroupLookup {
        pid: Pid,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to signal process group {pgid}: {source}")]
    #[diagnostic(
        code(terminate::signal),
        help("The group may have exited between lookup and delivery; check process state.")
    )]
    Signal {
        pgid: Pid,
        #[source]
        source: std::io::Error,
    },

    #[error("process-group termination is not supported on this platform")]
    #[diagnostic(
        code(terminate::unsupported),
        help("hotswapd requires a Unix process model for process-group signalling.")
    )]
    Unsupported,
}

/// Termination operation result
pub type TerminationResult<T> = std::result::Result<T, TerminationError>;

/// Pid persistence error
#[derive(Error, Debug, Diagnostic)]
#[error("failed to persist pid to {}: {source}", path.display())]
#[diagnostic(
    code(persist::io),
    help("Check that the pid file's directory exists and is writable.")
)]
pub struct PersistError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Persistence operation result
pub type PersistResult<T> = std::result::Result<T, PersistError>;

/// Unified supervisor error type with miette diagnostics
#[derive(Error, Debug, Diagnostic)]
pub enum SupervisorError {
    #[error("pointer error: {0}")]
    #[diagnostic(transparent)]
    Pointer(#[from] PointerError),

    #[error("launch error: {0}")]
    #[diagnostic(transparent)]
    Launch(#[from] LaunchError),

    #[error("termination error: {0}")]
    #[diagnostic(transparent)]
    Termination(#[from] TerminationError),

    #[error("persist error: {0}")]
    #[diagnostic(transparent)]
    Persist(#[from] PersistError),

    #[error("signal handler installation failed: {0}")]
    #[diagnostic(
        code(supervisor::signal_setup),
        help("The runtime could not register SIGINT/SIGTERM listeners.")
    )]
    SignalSetup(#[source] std::io::Error),
}

/// Result type for supervisor operations
///
/// # Must Use
/// Supervisor operations can fail and must be handled to avoid losing track
/// of a running child process
pub type SupervisorResult<T> = std::result::Result<T, SupervisorError>;
