/*!
 * Process Launcher
 * Spawns replacement binaries as process-group leaders
 */

use crate::core::errors::{LaunchError, LaunchResult};
use crate::process::handle::ProcessHandle;
use log::info;

/// Launch strategy for replacement binaries
///
/// Seam between the swap loop and the OS; production wiring uses
/// [`CommandLauncher`].
#[cfg_attr(test, mockall::automock)]
pub trait ProcessLauncher: Send {
    /// Launch the binary at `path` as the leader of a fresh process group,
    /// with stdout/stderr attached to the supervisor's own streams
    fn launch(&mut self, path: &str) -> LaunchResult<ProcessHandle>;
}

/// Spawns targets via `std::process::Command`
///
/// An optional runner prefix (e.g. `"go run"`) wraps the target, the way an
/// interpreter or build tool would be invoked by hand. Without one, the
/// target path is executed directly.
#[derive(Debug, Clone)]
pub struct CommandLauncher {
    runner: Option<Vec<String>>,
}

impl CommandLauncher {
    /// Build a launcher, validating the runner prefix if one is given
    ///
    /// The prefix is split on whitespace; the first token is the program
    /// and the rest lead the argument list, followed by the target path.
    pub fn new(runner: Option<&str>) -> LaunchResult<Self> {
        let runner = match runner {
            Some(raw) => {
                let tokens: Vec<String> = raw.split_whitespace().map(String::from).collect();
                if tokens.is_empty() {
                    return Err(LaunchError::InvalidRunner);
                }
                Some(tokens)
            }
            None => None,
        };
        Ok(Self { runner })
    }
}

impl ProcessLauncher for CommandLauncher {
    fn launch(&mut self, path: &str) -> LaunchResult<ProcessHandle> {
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            use std::process::{Command, Stdio};

            let mut command = match &self.runner {
                Some(tokens) => {
                    let mut command = Command::new(&tokens[0]);
                    command.args(&tokens[1..]).arg(path);
                    command
                }
                None => Command::new(path),
            };

            // Fresh group (pgid = child pid) so the whole child tree can be
            // signalled at once; output shares the supervisor's streams
            command
                .process_group(0)
                .stdin(Stdio::null())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit());

            let child = command.spawn().map_err(|source| LaunchError::Spawn {
                target: path.to_string(),
                source,
            })?;

            let handle = ProcessHandle::spawned(child);
            info!("Launched {} as process group {}", path, handle.pid());
            Ok(handle)
        }
        #[cfg(not(unix))]
        {
            let _ = path;
            log::warn!("Process-group launching not supported on this platform");
            Err(LaunchError::Unsupported)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_runner_prefix_is_tokenized() {
        let launcher = CommandLauncher::new(Some("go run -race")).unwrap();
        assert_eq!(
            launcher.runner,
            Some(vec![
                "go".to_string(),
                "run".to_string(),
                "-race".to_string()
            ])
        );
    }

    #[test]
    fn test_no_runner_executes_target_directly() {
        let launcher = CommandLauncher::new(None).unwrap();
        assert_eq!(launcher.runner, None);
    }

    #[test]
    fn test_blank_runner_is_rejected() {
        assert!(matches!(
            CommandLauncher::new(Some("   ")),
            Err(LaunchError::InvalidRunner)
        ));
        assert!(matches!(
            CommandLauncher::new(Some("")),
            Err(LaunchError::InvalidRunner)
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_launch_missing_target_is_spawn_error() {
        let mut launcher = CommandLauncher::new(None).unwrap();
        let err = launcher.launch("/nonexistent/hotswap-target").unwrap_err();
        assert!(matches!(err, LaunchError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_launch_places_child_in_own_group() {
        use nix::sys::signal::{killpg, Signal};
        use nix::unistd::{getpgid, Pid as NixPid};

        // The runner prefix doubles as a way to hand sleep its argument
        let mut launcher = CommandLauncher::new(Some("sleep")).unwrap();
        let mut handle = launcher.launch("30").unwrap();

        let pid = NixPid::from_raw(handle.pid() as i32);
        let pgid = getpgid(Some(pid)).expect("getpgid");
        assert_eq!(pgid, pid, "child should lead its own process group");

        let _ = killpg(pgid, Signal::SIGKILL);
        for _ in 0..100 {
            if handle.try_reap() {
                return;
            }
            std::thread::sleep(std::time::Duration::from_millis(10));
        }
        panic!("sleep child never exited after SIGKILL");
    }
}
