//! Failure modes of the shell collaborators.
//!
//! None of these stop a restart. The pipeline logs them and skips the item.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("shell window collection unavailable: {0}")]
    WindowsUnavailable(String),

    #[error("could not read location of shell window {index}: {reason}")]
    WindowLocation { index: usize, reason: String },

    #[error("process snapshot failed: {0}")]
    Snapshot(String),

    #[error("could not open process {pid}: {reason}")]
    OpenProcess { pid: u32, reason: String },

    #[error("could not terminate process {pid}: {reason}")]
    Terminate { pid: u32, reason: String },

    #[error("shell could not open {}: {reason}", .path.display())]
    OpenFolder { path: PathBuf, reason: String },

    #[error("not supported on this platform")]
    Unsupported,
}

pub type Result<T> = std::result::Result<T, ShellError>;
