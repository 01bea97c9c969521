//! Desktop shell restart
//!
//! One linear pipeline:
//! - capture the folders of every open shell window
//! - forcibly terminate the shell (the OS relaunches it)
//! - reopen the captured folders, pacing the requests
//!
//! Each external collaborator sits behind a trait so the pipeline can run
//! against the live system (`platform::SystemShell`) or a fake.

mod enumerate;
mod printing;
mod reopen;
mod result;
mod run;
mod terminate;

pub use enumerate::{collect_open_folders, open_folder_paths, ShellWindows, ShellWindowsConnector};
pub use printing::print_summary;
pub use reopen::{reopen_folders, FolderOpener, ReopenSummary};
pub use result::{RestartReport, StepResult};
pub use run::{restart_shell, run_restart, ShellHost};
pub use terminate::{
    is_shell_process, terminate_shell, ProcessControl, ProcessEntry, TerminateOutcome,
    TerminationSummary,
};
