use std::time::Duration;

/// Tunables for one restart.
///
/// Both timings were picked empirically; they pace the shell, they are not
/// protocol requirements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestartConfig {
    /// Executable name of the desktop shell, matched case-insensitively.
    pub shell_executable: String,

    /// Longest wait for each terminated shell process to exit.
    pub termination_timeout: Duration,

    /// Pause after each folder open request.
    pub reopen_delay: Duration,
}

impl Default for RestartConfig {
    fn default() -> Self {
        Self {
            shell_executable: default_shell_executable(),
            termination_timeout: Duration::from_millis(default_termination_timeout_ms()),
            reopen_delay: Duration::from_millis(default_reopen_delay_ms()),
        }
    }
}

fn default_shell_executable() -> String {
    "explorer.exe".to_string()
}

fn default_termination_timeout_ms() -> u64 {
    2000
}

fn default_reopen_delay_ms() -> u64 {
    100
}

impl RestartConfig {
    /// Apply CLI option overrides
    pub fn apply_cli_overrides(
        &mut self,
        kill_timeout_ms: Option<u64>,
        reopen_delay_ms: Option<u64>,
    ) {
        if let Some(ms) = kill_timeout_ms {
            self.termination_timeout = Duration::from_millis(ms);
        }
        if let Some(ms) = reopen_delay_ms {
            self.reopen_delay = Duration::from_millis(ms);
        }
    }
}
