//! Live system bindings for the restart pipeline.
//!
//! On Windows `SystemShell` talks to the real shell through COM, Toolhelp32
//! and `ShellExecuteW`. Everywhere else each collaborator reports
//! `ShellError::Unsupported`, which the pipeline treats as nothing to do.

#[cfg(windows)]
mod win32;

/// The desktop shell of the machine this process runs on.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemShell;

#[cfg(not(windows))]
mod unsupported {
    use super::SystemShell;
    use crate::error::{Result, ShellError};
    use crate::restart::{
        FolderOpener, ProcessControl, ProcessEntry, ShellWindows, ShellWindowsConnector,
        TerminateOutcome,
    };
    use std::path::Path;
    use std::time::Duration;

    impl ShellWindowsConnector for SystemShell {
        fn connect(&self) -> Result<Box<dyn ShellWindows + '_>> {
            Err(ShellError::Unsupported)
        }
    }

    impl ProcessControl for SystemShell {
        fn snapshot(&self) -> Result<Vec<ProcessEntry>> {
            Err(ShellError::Unsupported)
        }

        fn terminate(&self, _pid: u32, _timeout: Duration) -> Result<TerminateOutcome> {
            Err(ShellError::Unsupported)
        }
    }

    impl FolderOpener for SystemShell {
        fn open(&self, _path: &Path) -> Result<()> {
            Err(ShellError::Unsupported)
        }
    }
}
