//! Restart output formatting feature.

use super::result::{RestartReport, StepResult};
use crate::output::OutputMode;
use crate::theme::Theme;
use std::path::PathBuf;

pub(crate) fn print_step_start(message: &str, output_mode: OutputMode) {
    if output_mode != OutputMode::Quiet {
        print!("  {} ", Theme::muted("→"));
        print!("{}", message);
        std::io::Write::flush(&mut std::io::stdout()).ok();
    }
}

pub(crate) fn print_step_result(result: &StepResult, output_mode: OutputMode) {
    if output_mode == OutputMode::Quiet {
        return;
    }

    // Overwrite the "in progress" line
    print!("\r");

    if result.skipped {
        println!(
            "  {} {} - {}",
            Theme::muted("○"),
            result.action,
            Theme::muted(&result.message)
        );
    } else if result.success {
        println!(
            "  {} {} - {}",
            Theme::success("✓"),
            result.action,
            Theme::success(&result.message)
        );
    } else {
        println!(
            "  {} {} - {}",
            Theme::error("✗"),
            result.action,
            Theme::error(&result.message)
        );
    }
}

/// List captured folders (verbose mode only).
pub(crate) fn print_folders(folders: &[PathBuf], output_mode: OutputMode) {
    if output_mode != OutputMode::Verbose {
        return;
    }
    for folder in folders {
        println!("      {}", Theme::value(&folder.display().to_string()));
    }
}

/// Print summary of a restart
pub fn print_summary(report: &RestartReport, output_mode: OutputMode) {
    if output_mode == OutputMode::Quiet {
        return;
    }

    let failed = report.steps.iter().filter(|s| !s.success).count();
    let skipped = report.steps.iter().filter(|s| s.skipped).count();

    println!();
    println!("{}", Theme::divider(60));
    println!(
        "{}",
        Theme::primary(&format!(
            "Summary: {} folder(s) captured, {} reopen request(s), {} step(s) skipped, {} with problems",
            report.folders.len(),
            report.reopen_requests(),
            skipped,
            failed
        ))
    );

    if let Some(reopen) = &report.reopen {
        if !reopen.failed.is_empty() {
            println!();
            println!("{}", Theme::warning("These folders could not be reopened:"));
            for path in &reopen.failed {
                println!("  • {}", Theme::muted(&path.display().to_string()));
            }
        }
    }
}
