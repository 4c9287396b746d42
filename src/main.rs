/*!
 * Hotswapd - Main Entry Point
 *
 * Process supervisor that:
 * - Polls an external <hash> <path> pointer file
 * - Terminates the previous process group when the hash changes
 * - Launches the replacement binary in a fresh process group
 * - Hands off after the configured swap budget is exhausted
 */

use clap::Parser;
use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use hotswapd::core::limits::{DEFAULT_PID_FILE, DEFAULT_POINTER_FILE, DEFAULT_POLL_INTERVAL};
use hotswapd::{
    init_tracing, CommandLauncher, ShutdownCoordinator, SignalTerminator, SupervisorConfig,
    SupervisorPhase, SwapSupervisor,
};

/// Hash-triggered process supervisor
#[derive(Parser, Debug)]
#[command(name = "hotswapd", version, about)]
struct Cli {
    /// Maximum number of swaps before handing off (0 = unbounded)
    #[arg(long, default_value_t = 0)]
    max_swaps: u32,

    /// Pointer file announcing the current hash and binary path
    #[arg(long, env = "HOTSWAPD_POINTER_FILE", default_value = DEFAULT_POINTER_FILE)]
    pointer_file: PathBuf,

    /// File receiving the final pid once the swap budget is exhausted
    #[arg(long, env = "HOTSWAPD_PID_FILE", default_value = DEFAULT_PID_FILE)]
    pid_file: PathBuf,

    /// Seconds between pointer polls
    #[arg(
        long,
        env = "HOTSWAPD_POLL_INTERVAL_SECS",
        default_value_t = DEFAULT_POLL_INTERVAL.as_secs()
    )]
    poll_interval_secs: u64,

    /// Command prefix the target is run through (e.g. "go run")
    #[arg(long, env = "HOTSWAPD_RUNNER")]
    runner: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    // Initialize structured tracing
    init_tracing();

    info!("hotswapd starting");

    let mut config = SupervisorConfig::new()
        .with_pointer_file(cli.pointer_file)
        .with_pid_file(cli.pid_file)
        .with_poll_interval(Duration::from_secs(cli.poll_interval_secs))
        .with_swap_budget(cli.max_swaps);
    if let Some(runner) = cli.runner {
        config = config.with_runner(runner);
    }

    info!(
        pointer_file = %config.pointer_file.display(),
        pid_file = %config.pid_file.display(),
        poll_interval_secs = config.poll_interval.as_secs(),
        swap_budget = config.swap_budget,
        runner = ?config.runner,
        "Supervisor configured"
    );

    let launcher = CommandLauncher::new(config.runner.as_deref())?;
    let terminator = SignalTerminator::new();

    let coordinator = ShutdownCoordinator::new();
    coordinator.install()?;

    let supervisor = SwapSupervisor::new(
        config,
        Box::new(launcher),
        Box::new(terminator),
        coordinator.signal(),
    );

    let outcome = supervisor.run().await?;

    match outcome.phase {
        SupervisorPhase::Draining => info!(
            swaps = outcome.swaps_performed,
            pinned_pid = ?outcome.pinned_pid,
            "Swap budget exhausted; handing off to the pinned process"
        ),
        _ => info!(
            swaps = outcome.swaps_performed,
            polls = outcome.polls,
            "Supervisor stopped"
        ),
    }

    Ok(())
}
