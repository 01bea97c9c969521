//! Folder reopening feature.

use crate::error::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// The shell's default "open" action.
pub trait FolderOpener {
    /// Ask the OS to open `path` with its default handler.
    fn open(&self, path: &Path) -> Result<()>;
}

/// Counts from one reopen pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReopenSummary {
    pub requested: usize,
    pub failed: Vec<PathBuf>,
}

impl ReopenSummary {
    pub fn succeeded(&self) -> usize {
        self.requested - self.failed.len()
    }
}

/// Issue one open request per path, in order, pausing `delay` after each.
///
/// A freshly relaunched shell can drop or reorder windows when requests
/// arrive back to back. A failed request is never retried and never stops
/// the remaining ones.
pub fn reopen_folders<O: FolderOpener + ?Sized>(
    opener: &O,
    paths: &[PathBuf],
    delay: Duration,
) -> ReopenSummary {
    let mut summary = ReopenSummary::default();

    for path in paths {
        summary.requested += 1;
        if let Err(e) = opener.open(path) {
            log::debug!("{}", e);
            summary.failed.push(path.clone());
        }
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }

    summary
}
