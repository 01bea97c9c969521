//! Restart run orchestration feature.

use super::enumerate::{open_folder_paths, ShellWindowsConnector};
use super::printing::{print_folders, print_step_result, print_step_start};
use super::reopen::{reopen_folders, FolderOpener};
use super::result::{RestartReport, StepResult};
use super::terminate::{terminate_shell, ProcessControl};
use crate::config::RestartConfig;
use crate::output::OutputMode;
use crate::platform::SystemShell;

/// Everything the pipeline needs from the host: the window collection,
/// the process table and the "open" verb.
pub trait ShellHost: ShellWindowsConnector + ProcessControl + FolderOpener {}

impl<T: ShellWindowsConnector + ProcessControl + FolderOpener> ShellHost for T {}

/// Restart the live desktop shell with the given settings.
pub fn run_restart(
    config: &RestartConfig,
    dry_run: bool,
    output_mode: OutputMode,
) -> RestartReport {
    restart_shell(&SystemShell, config, dry_run, output_mode)
}

/// Capture open folders, kill the shell, then reopen the folders.
///
/// The steps run strictly in that order. Every failure degrades to "skip and
/// continue", so this always returns a report. In dry-run mode only the
/// capture step runs.
pub fn restart_shell<H: ShellHost + ?Sized>(
    host: &H,
    config: &RestartConfig,
    dry_run: bool,
    output_mode: OutputMode,
) -> RestartReport {
    let mut report = RestartReport::default();

    // 1) Capture while the shell is still alive
    print_step_start("Capturing open folder windows...", output_mode);
    report.folders = open_folder_paths(host);
    let step = StepResult::success(
        "Capture folders",
        &format!("{} folder window(s) found", report.folders.len()),
    );
    print_step_result(&step, output_mode);
    print_folders(&report.folders, output_mode);
    report.steps.push(step);

    // 2) Kill the shell. The OS relaunches it on its own.
    let terminate_action = format!("Terminate {}", config.shell_executable);
    let step = if dry_run {
        StepResult::skipped(
            &terminate_action,
            &format!("Dry run mode - would terminate {}", config.shell_executable),
        )
    } else {
        print_step_start(&format!("Terminating {}...", config.shell_executable), output_mode);
        let summary = terminate_shell(host, config);
        report.termination = Some(summary);

        if summary.matched == 0 {
            StepResult::success(&terminate_action, "No running instance found")
        } else if summary.failed > 0 {
            StepResult::failure(
                &terminate_action,
                &format!(
                    "Terminated {} of {} instance(s), {} could not be stopped",
                    summary.exited + summary.timed_out,
                    summary.matched,
                    summary.failed
                ),
            )
        } else if summary.timed_out > 0 {
            StepResult::success(
                &terminate_action,
                &format!(
                    "Terminated {} instance(s), {} still exiting after {} ms",
                    summary.matched,
                    summary.timed_out,
                    config.termination_timeout.as_millis()
                ),
            )
        } else {
            StepResult::success(
                &terminate_action,
                &format!("Terminated {} instance(s)", summary.matched),
            )
        }
    };
    print_step_result(&step, output_mode);
    report.steps.push(step);

    // 3) Reopen what was captured
    let step = if dry_run {
        StepResult::skipped(
            "Reopen folders",
            &format!("Dry run mode - would reopen {} folder(s)", report.folders.len()),
        )
    } else if report.folders.is_empty() {
        StepResult::skipped("Reopen folders", "No folders to reopen")
    } else {
        print_step_start("Reopening folders...", output_mode);
        let summary = reopen_folders(host, &report.folders, config.reopen_delay);
        let step = if summary.failed.is_empty() {
            StepResult::success(
                "Reopen folders",
                &format!("Requested {} folder(s)", summary.requested),
            )
        } else {
            StepResult::failure(
                "Reopen folders",
                &format!(
                    "Requested {} of {} folder(s)",
                    summary.succeeded(),
                    summary.requested
                ),
            )
        };
        report.reopen = Some(summary);
        step
    };
    print_step_result(&step, output_mode);
    report.steps.push(step);

    report
}
