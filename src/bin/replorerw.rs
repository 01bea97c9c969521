//! Windowless entry point: same restart as `replorer` with no arguments,
//! without a console window.

#![cfg_attr(windows, windows_subsystem = "windows")]

use anyhow::Result;
use replorer::config::RestartConfig;
use replorer::output::OutputMode;
use replorer::restart;

fn main() -> Result<()> {
    restart::run_restart(&RestartConfig::default(), false, OutputMode::Quiet);
    Ok(())
}
