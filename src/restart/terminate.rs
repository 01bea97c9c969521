//! Shell process termination feature.

use crate::config::RestartConfig;
use crate::error::Result;
use serde::Serialize;
use std::time::Duration;

/// One row of a process snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessEntry {
    pub pid: u32,
    pub exe_name: String,
}

/// How a forced termination ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminateOutcome {
    /// The process exited within the wait window.
    Exited,
    /// The wait window elapsed first. The process may still be running.
    TimedOut,
}

/// Process inventory plus forced termination.
pub trait ProcessControl {
    /// Take one snapshot of every running process.
    fn snapshot(&self) -> Result<Vec<ProcessEntry>>;

    /// Terminate `pid` immediately and wait up to `timeout` for it to exit.
    ///
    /// Implementations release the process handle before returning, whatever
    /// the outcome.
    fn terminate(&self, pid: u32, timeout: Duration) -> Result<TerminateOutcome>;
}

/// Counts from one termination pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TerminationSummary {
    pub matched: usize,
    pub exited: usize,
    pub timed_out: usize,
    pub failed: usize,
}

/// Whether a snapshot entry is an instance of the shell.
pub fn is_shell_process(entry: &ProcessEntry, shell_executable: &str) -> bool {
    entry.exe_name.to_lowercase() == shell_executable.to_lowercase()
}

/// Forcibly terminate every running instance of the shell.
///
/// There is no graceful shutdown and no relaunch: the OS restarts the shell on
/// its own once none is running. A failed snapshot makes this a no-op.
pub fn terminate_shell<P: ProcessControl + ?Sized>(
    control: &P,
    config: &RestartConfig,
) -> TerminationSummary {
    let mut summary = TerminationSummary::default();

    let processes = match control.snapshot() {
        Ok(processes) => processes,
        Err(e) => {
            log::debug!("Skipping shell termination: {}", e);
            return summary;
        }
    };

    for entry in processes
        .iter()
        .filter(|p| is_shell_process(p, &config.shell_executable))
    {
        summary.matched += 1;
        match control.terminate(entry.pid, config.termination_timeout) {
            Ok(TerminateOutcome::Exited) => {
                log::debug!("Terminated {} (pid {})", entry.exe_name, entry.pid);
                summary.exited += 1;
            }
            Ok(TerminateOutcome::TimedOut) => {
                log::debug!(
                    "{} (pid {}) did not exit within {:?}",
                    entry.exe_name,
                    entry.pid,
                    config.termination_timeout
                );
                summary.timed_out += 1;
            }
            Err(e) => {
                log::debug!("{}", e);
                summary.failed += 1;
            }
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShellError;
    use std::cell::RefCell;

    struct FakeProcesses {
        table: Option<Vec<ProcessEntry>>,
        deny: Vec<u32>,
        slow: Vec<u32>,
        terminated: RefCell<Vec<(u32, Duration)>>,
    }

    impl FakeProcesses {
        fn new(table: Vec<(u32, &str)>) -> Self {
            Self {
                table: Some(
                    table
                        .into_iter()
                        .map(|(pid, name)| ProcessEntry {
                            pid,
                            exe_name: name.to_string(),
                        })
                        .collect(),
                ),
                deny: Vec::new(),
                slow: Vec::new(),
                terminated: RefCell::new(Vec::new()),
            }
        }
    }

    impl ProcessControl for FakeProcesses {
        fn snapshot(&self) -> Result<Vec<ProcessEntry>> {
            self.table
                .clone()
                .ok_or_else(|| ShellError::Snapshot("denied".into()))
        }

        fn terminate(&self, pid: u32, timeout: Duration) -> Result<TerminateOutcome> {
            self.terminated.borrow_mut().push((pid, timeout));
            if self.deny.contains(&pid) {
                return Err(ShellError::OpenProcess {
                    pid,
                    reason: "access denied".into(),
                });
            }
            if self.slow.contains(&pid) {
                return Ok(TerminateOutcome::TimedOut);
            }
            Ok(TerminateOutcome::Exited)
        }
    }

    #[test]
    fn test_matches_shell_case_insensitively() {
        let control = FakeProcesses::new(vec![
            (4, "System"),
            (10, "EXPLORER.EXE"),
            (11, "Explorer.exe"),
            (12, "explorer.exe"),
            (13, "explorer.exe.bak"),
            (14, "notepad.exe"),
        ]);
        let summary = terminate_shell(&control, &RestartConfig::default());

        let pids: Vec<u32> = control.terminated.borrow().iter().map(|(p, _)| *p).collect();
        assert_eq!(pids, vec![10, 11, 12]);
        assert_eq!(summary.matched, 3);
        assert_eq!(summary.exited, 3);
    }

    #[test]
    fn test_passes_configured_timeout() {
        let control = FakeProcesses::new(vec![(10, "explorer.exe")]);
        let mut config = RestartConfig::default();
        config.apply_cli_overrides(Some(750), None);
        terminate_shell(&control, &config);
        assert_eq!(
            control.terminated.borrow()[0],
            (10, Duration::from_millis(750))
        );
    }

    #[test]
    fn test_failures_do_not_stop_remaining_instances() {
        let mut control = FakeProcesses::new(vec![
            (10, "explorer.exe"),
            (11, "explorer.exe"),
            (12, "explorer.exe"),
        ]);
        control.deny = vec![10];
        control.slow = vec![11];

        let summary = terminate_shell(&control, &RestartConfig::default());
        assert_eq!(control.terminated.borrow().len(), 3);
        assert_eq!(
            summary,
            TerminationSummary {
                matched: 3,
                exited: 1,
                timed_out: 1,
                failed: 1,
            }
        );
    }

    #[test]
    fn test_snapshot_failure_is_noop() {
        let mut control = FakeProcesses::new(vec![]);
        control.table = None;
        let summary = terminate_shell(&control, &RestartConfig::default());
        assert_eq!(summary, TerminationSummary::default());
        assert!(control.terminated.borrow().is_empty());
    }

    #[test]
    fn test_no_shell_running() {
        let control = FakeProcesses::new(vec![(4, "System"), (99, "svchost.exe")]);
        let summary = terminate_shell(&control, &RestartConfig::default());
        assert_eq!(summary.matched, 0);
        assert!(control.terminated.borrow().is_empty());
    }
}
