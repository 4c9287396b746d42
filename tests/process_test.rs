/*!
 * Process Integration Tests
 * Real child processes: group placement, group signalling, runner execution
 */

#![cfg(unix)]

use hotswapd::{CommandLauncher, ProcessGroupTerminator, ProcessLauncher, SignalTerminator};
use nix::sys::signal::{kill, Signal};
use nix::unistd::{getpgid, getpgrp, Pid as NixPid};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;
    let path = dir.join(name);
    std::fs::write(&path, body).unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}

fn wait_for(mut condition: impl FnMut() -> bool, timeout: Duration) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(20));
    }
    false
}

fn pid_alive(pid: u32) -> bool {
    kill(NixPid::from_raw(pid as i32), None).is_ok()
}

fn kill_group(pid: u32) {
    let mut terminator = SignalTerminator::new().with_signal(Signal::SIGKILL);
    let _ = terminator.terminate_group(pid);
}

#[test]
fn test_launched_child_runs_until_terminated() {
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("marker");
    let script = write_script(
        dir.path(),
        "app.sh",
        &format!("#!/bin/sh\ndate > \"{}\"\nsleep 600\n", marker.display()),
    );

    let mut launcher = CommandLauncher::new(None).unwrap();
    let mut handle = launcher.launch(script.to_str().unwrap()).unwrap();

    assert!(
        wait_for(|| marker.exists(), Duration::from_secs(5)),
        "child never wrote its marker"
    );
    assert!(!handle.try_reap(), "child exited prematurely");

    kill_group(handle.pid());
    assert!(wait_for(|| handle.try_reap(), Duration::from_secs(5)));
}

#[test]
fn test_launched_child_leads_its_own_group() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_script(dir.path(), "app.sh", "#!/bin/sh\nsleep 600\n");

    let mut launcher = CommandLauncher::new(None).unwrap();
    let mut handle = launcher.launch(script.to_str().unwrap()).unwrap();

    let pgid = getpgid(Some(NixPid::from_raw(handle.pid() as i32))).unwrap();
    assert_eq!(pgid.as_raw() as u32, handle.pid());
    assert_ne!(pgid, getpgrp(), "child must not share the test's group");

    kill_group(handle.pid());
    assert!(wait_for(|| handle.try_reap(), Duration::from_secs(5)));
}

#[test]
fn test_terminator_takes_down_the_whole_group() {
    let dir = tempfile::tempdir().unwrap();
    let grandchild_file = dir.path().join("grandchild_pid");
    let script = write_script(
        dir.path(),
        "app.sh",
        &format!(
            "#!/bin/sh\nsleep 600 &\necho $! > \"{}\"\nwait\n",
            grandchild_file.display()
        ),
    );

    let mut launcher = CommandLauncher::new(None).unwrap();
    let mut handle = launcher.launch(script.to_str().unwrap()).unwrap();

    assert!(
        wait_for(|| grandchild_file.exists(), Duration::from_secs(5)),
        "child never announced its grandchild"
    );
    let grandchild: u32 = std::fs::read_to_string(&grandchild_file)
        .unwrap()
        .trim()
        .parse()
        .unwrap();
    assert!(pid_alive(grandchild));

    let mut terminator = SignalTerminator::new();
    terminator.terminate_group(handle.pid()).unwrap();

    assert!(
        wait_for(|| handle.try_reap(), Duration::from_secs(5)),
        "direct child survived group SIGTERM"
    );
    assert!(
        wait_for(|| !pid_alive(grandchild), Duration::from_secs(5)),
        "grandchild survived group SIGTERM"
    );
}

#[test]
fn test_sigterm_resistant_child_requires_sigkill() {
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("marker");
    // The trap is installed before the marker appears, so a SIGTERM sent
    // after the marker exists is guaranteed to be ignored
    let script = write_script(
        dir.path(),
        "stubborn.sh",
        &format!(
            "#!/bin/sh\ntrap '' TERM\ndate > \"{}\"\nwhile :; do sleep 1; done\n",
            marker.display()
        ),
    );

    let mut launcher = CommandLauncher::new(None).unwrap();
    let mut handle = launcher.launch(script.to_str().unwrap()).unwrap();
    assert!(wait_for(|| marker.exists(), Duration::from_secs(5)));

    let mut terminator = SignalTerminator::new();
    terminator.terminate_group(handle.pid()).unwrap();

    std::thread::sleep(Duration::from_millis(300));
    assert!(!handle.try_reap(), "child should have ignored SIGTERM");

    let mut killer = SignalTerminator::new().with_signal(Signal::SIGKILL);
    killer.terminate_group(handle.pid()).unwrap();
    assert!(wait_for(|| handle.try_reap(), Duration::from_secs(5)));
}

#[test]
fn test_runner_prefix_executes_plain_file() {
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("marker");
    // No shebang, no exec bit; only the runner makes this runnable
    let target = dir.path().join("app.txt");
    std::fs::write(
        &target,
        format!("date > \"{}\"\nsleep 600\n", marker.display()),
    )
    .unwrap();

    let mut launcher = CommandLauncher::new(Some("sh")).unwrap();
    let mut handle = launcher.launch(target.to_str().unwrap()).unwrap();

    assert!(
        wait_for(|| marker.exists(), Duration::from_secs(5)),
        "runner never executed the target"
    );

    kill_group(handle.pid());
    assert!(wait_for(|| handle.try_reap(), Duration::from_secs(5)));
}
