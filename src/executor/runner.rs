//! Delegated subprocess management
//!
//! This module handles:
//! - Spawning the Python interpreter / pip installer
//! - Inheriting stdio so the delegate's output reaches the user untouched
//! - Waiting for completion, with an optional timeout
//! - Handling signals (SIGTERM, SIGINT)
//! - Collecting exit codes

use crate::error::Result;
use std::path::Path;
use std::process::{Command, ExitStatus};
use std::time::{Duration, Instant};

/// Result of running a delegated command
#[derive(Debug)]
pub struct RunResult {
    /// The exit code from the child process
    pub exit_code: i32,
    /// How long the command took to run
    pub duration: Duration,
    /// Whether the process completed normally (not killed)
    pub completed: bool,
}

/// Options for running a delegated command
pub struct RunOptions<'a> {
    /// Program to spawn (e.g. "python3", "/usr/bin/pip3", "sudo")
    pub program: &'a str,
    /// Arguments passed verbatim
    pub args: Vec<String>,
    /// Optional working directory for the child.
    /// When set, the child runs in this directory instead of the invoking directory.
    pub working_dir: Option<&'a Path>,
    /// Optional timeout (kill if exceeds)
    pub timeout: Option<Duration>,
}

impl<'a> RunOptions<'a> {
    pub fn new(program: &'a str) -> Self {
        Self {
            program,
            args: Vec::new(),
            working_dir: None,
            timeout: None,
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_working_dir(mut self, dir: &'a Path) -> Self {
        self.working_dir = Some(dir);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Run a delegated command, inheriting stdio.
///
/// sweepy adds no output of its own between the child's output and the
/// exit; the returned exit code is the child's own (128+signal when the
/// child died to a signal on Unix).
pub fn run_command(options: RunOptions) -> Result<RunResult> {
    let start = Instant::now();

    let mut cmd = Command::new(options.program);
    cmd.args(&options.args);

    if let Some(dir) = options.working_dir {
        cmd.current_dir(dir);
    }

    let mut child = cmd.spawn().map_err(|e| {
        crate::error::Error::Execution(format!("Failed to spawn {}: {}", options.program, e))
    })?;

    let exit_status = if let Some(timeout) = options.timeout {
        wait_with_timeout(&mut child, timeout)?
    } else {
        child.wait()?
    };

    let duration = start.elapsed();
    let exit_code = exit_code_from_status(&exit_status);
    let completed = exit_status.code().is_some();

    Ok(RunResult {
        exit_code,
        duration,
        completed,
    })
}

/// Wait for process with timeout
///
/// If timeout expires, kills the process with SIGTERM, then SIGKILL after 5s.
/// Uses channel-based cancellation so the watchdog is cleanly stopped when
/// the process exits before the timeout.
fn wait_with_timeout(child: &mut std::process::Child, timeout: Duration) -> Result<ExitStatus> {
    use std::sync::mpsc;
    use std::thread;

    #[cfg(unix)]
    let pid = child.id();

    let (tx, rx) = mpsc::channel();

    let watchdog = thread::spawn(move || {
        // Wait for timeout OR cancellation signal
        if rx.recv_timeout(timeout).is_err() {
            // Timeout expired, no cancel received — kill process
            #[cfg(unix)]
            unsafe {
                libc::kill(pid as i32, libc::SIGTERM);

                // SIGKILL escalation — wait 5s, then force kill if still alive
                thread::sleep(Duration::from_secs(5));
                if libc::kill(pid as i32, 0) == 0 {
                    libc::kill(pid as i32, libc::SIGKILL);
                }
            }
        }
        // If Ok(_) received, process exited normally — do nothing
    });

    let status = child.wait()?;
    let _ = tx.send(()); // Cancel watchdog (ignore error if thread already exited)
    let _ = watchdog.join(); // Wait for clean thread shutdown

    Ok(status)
}

/// Extract exit code from ExitStatus
///
/// On Unix, handles both normal exits and signals:
/// - Normal exit: return code
/// - Signal: 128 + signal number
fn exit_code_from_status(status: &ExitStatus) -> i32 {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(code) = status.code() {
            code
        } else if let Some(signal) = status.signal() {
            // Process killed by signal: return 128 + signal
            128 + signal
        } else {
            // Unknown exit status
            -1
        }
    }

    #[cfg(not(unix))]
    {
        status.code().unwrap_or(-1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_options_builder() {
        let options = RunOptions::new("python3")
            .with_args(["runtests.py", "--failfast"])
            .with_working_dir(Path::new("/tmp/project"))
            .with_timeout(Duration::from_secs(60));

        assert_eq!(options.program, "python3");
        assert_eq!(options.args, vec!["runtests.py", "--failfast"]);
        assert_eq!(options.working_dir, Some(Path::new("/tmp/project")));
        assert_eq!(options.timeout, Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_spawn_failure_is_execution_error() {
        let options = RunOptions::new("/nonexistent/sweepy-delegate");
        let result = run_command(options);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Failed to spawn"));
    }

    #[test]
    #[cfg(unix)]
    fn test_exit_code_propagated() {
        let options = RunOptions::new("/bin/sh").with_args(["-c", "exit 7"]);
        let result = run_command(options).unwrap();
        assert_eq!(result.exit_code, 7);
        assert!(result.completed);
    }

    #[test]
    #[cfg(unix)]
    fn test_signal_death_reported_as_128_plus() {
        // Child kills itself with SIGKILL (9)
        let options = RunOptions::new("/bin/sh").with_args(["-c", "kill -9 $$"]);
        let result = run_command(options).unwrap();
        assert_eq!(result.exit_code, 128 + 9);
        assert!(!result.completed);
    }

    #[test]
    fn test_watchdog_cancellation() {
        // Verify that a fast-exiting process cancels the watchdog
        // without sending any signal
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::mpsc;
        use std::sync::Arc;
        use std::thread;

        let signal_sent = Arc::new(AtomicBool::new(false));
        let signal_sent_clone = signal_sent.clone();

        let (tx, rx) = mpsc::channel();

        let watchdog = thread::spawn(move || {
            if rx.recv_timeout(Duration::from_secs(10)).is_err() {
                signal_sent_clone.store(true, Ordering::SeqCst);
            }
        });

        // Simulate process exiting immediately
        tx.send(()).unwrap();
        watchdog.join().unwrap();

        assert!(
            !signal_sent.load(Ordering::SeqCst),
            "Watchdog should NOT fire when cancelled"
        );
    }
}
