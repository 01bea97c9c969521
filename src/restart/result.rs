//! Restart result feature.

use super::reopen::ReopenSummary;
use super::terminate::TerminationSummary;
use serde::Serialize;
use std::path::PathBuf;

/// Outcome of one pipeline step, for console reporting.
#[derive(Debug, Clone, Serialize)]
pub struct StepResult {
    /// Name of the step
    pub action: String,
    /// Whether the step did everything it tried to do
    pub success: bool,
    /// Whether the step was not run at all
    pub skipped: bool,
    /// Human-readable message about the result
    pub message: String,
}

impl StepResult {
    pub(crate) fn success(action: &str, message: &str) -> Self {
        Self {
            action: action.to_string(),
            success: true,
            skipped: false,
            message: message.to_string(),
        }
    }

    pub(crate) fn failure(action: &str, message: &str) -> Self {
        Self {
            action: action.to_string(),
            success: false,
            skipped: false,
            message: message.to_string(),
        }
    }

    pub(crate) fn skipped(action: &str, message: &str) -> Self {
        Self {
            action: action.to_string(),
            success: true, // Skipped is not an error
            skipped: true,
            message: format!("Skipped: {}", message),
        }
    }
}

/// Everything one run did.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RestartReport {
    /// Folder paths captured before the shell went down
    pub folders: Vec<PathBuf>,
    /// `None` when termination was not attempted (dry run)
    pub termination: Option<TerminationSummary>,
    /// `None` when nothing was reopened (dry run or no folders)
    pub reopen: Option<ReopenSummary>,
    pub steps: Vec<StepResult>,
}

impl RestartReport {
    /// Number of open requests issued.
    pub fn reopen_requests(&self) -> usize {
        self.reopen.as_ref().map_or(0, |r| r.requested)
    }
}
