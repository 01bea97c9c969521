use clap::error::ErrorKind;
use clap::{ArgAction, Parser};
use log::LevelFilter;
use std::ffi::OsString;

use crate::config::RestartConfig;
use crate::output::OutputMode;
use crate::restart;
use crate::theme::Theme;

#[derive(Parser, Debug, Default)]
#[command(name = "replorer")]
#[command(version)]
#[command(about = "Restart Windows Explorer and reopen the folders that were open")]
#[command(
    long_about = "Replorer force-restarts Windows Explorer and restores your folder windows.\n\n\
    It records every open folder window, kills explorer.exe, lets Windows bring the \
    shell back on its own, then reopens each recorded folder. Virtual windows \
    (This PC, Control Panel, search results) are not restored.\n\n\
    Examples:\n  \
    replorer                     # Restart silently\n  \
    replorer -v                  # Restart and report each step\n  \
    replorer --dry-run           # Only list the folders that would be restored\n  \
    replorer --dry-run --json    # Same, as JSON"
)]
pub struct Cli {
    /// Report progress (-v per step, -vv adds folders and diagnostics)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,

    /// List the open folders without restarting Explorer
    #[arg(long)]
    pub dry_run: bool,

    /// Print the run report as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Longest wait for each Explorer process to exit [default: 2000]
    #[arg(long, value_name = "MS")]
    pub kill_timeout: Option<u64>,

    /// Pause after each folder open request [default: 100]
    #[arg(long, value_name = "MS")]
    pub reopen_delay: Option<u64>,
}

impl Cli {
    pub fn parse() -> Self {
        Self::parse_lenient(std::env::args_os())
    }

    /// Parse arguments without ever refusing to run.
    ///
    /// `--help` and `--version` print and exit 0 as usual. Anything clap does
    /// not understand (a stray path from a shortcut, an unknown flag, a bad
    /// value) falls back to the default silent restart.
    pub fn parse_lenient<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match Self::try_parse_from(args) {
            Ok(cli) => cli,
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                e.exit()
            }
            Err(_) => Self::default(),
        }
    }

    /// Console output mode for these flags.
    pub fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Quiet
        } else if self.dry_run {
            // A dry run is only useful if it shows the folders
            OutputMode::Verbose
        } else {
            OutputMode::from_verbosity(self.verbose)
        }
    }

    pub fn config(&self) -> RestartConfig {
        let mut config = RestartConfig::default();
        config.apply_cli_overrides(self.kill_timeout, self.reopen_delay);
        config
    }

    pub fn run(self) -> anyhow::Result<()> {
        init_logging(self.verbose);

        let output_mode = self.output_mode();
        let config = self.config();

        if output_mode != OutputMode::Quiet {
            println!();
            println!("{}", Theme::header("Explorer Restart"));
            println!("{}", Theme::divider_bold(60));
            if self.dry_run {
                println!("{}", Theme::warning("DRY RUN MODE - Explorer will not be restarted"));
            }
            println!();
        }

        let report = restart::run_restart(&config, self.dry_run, output_mode);

        if self.json {
            match serde_json::to_string_pretty(&report) {
                Ok(json) => println!("{}", json),
                Err(e) => log::debug!("Failed to serialize report: {}", e),
            }
        } else {
            restart::print_summary(&report, output_mode);
        }

        Ok(())
    }
}

/// Install a stderr logger for `-vv` and above. Nothing is logged otherwise.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 | 1 => return,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // Built programmatically so no environment variable is consulted
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::time::Duration;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_arguments_is_silent_default_restart() {
        let cli = Cli::try_parse_from(["replorer"]).unwrap();
        assert!(!cli.dry_run);
        assert_eq!(cli.output_mode(), OutputMode::Quiet);
        assert_eq!(cli.config(), RestartConfig::default());
    }

    #[test]
    fn test_verbosity_flags() {
        let cli = Cli::try_parse_from(["replorer", "-v"]).unwrap();
        assert_eq!(cli.output_mode(), OutputMode::Normal);
        let cli = Cli::try_parse_from(["replorer", "-vv"]).unwrap();
        assert_eq!(cli.output_mode(), OutputMode::Verbose);
    }

    #[test]
    fn test_dry_run_and_json_modes() {
        let cli = Cli::try_parse_from(["replorer", "--dry-run"]).unwrap();
        assert_eq!(cli.output_mode(), OutputMode::Verbose);
        let cli = Cli::try_parse_from(["replorer", "--dry-run", "--json", "-v"]).unwrap();
        assert_eq!(cli.output_mode(), OutputMode::Quiet);
    }

    #[test]
    fn test_timing_overrides() {
        let cli =
            Cli::try_parse_from(["replorer", "--kill-timeout", "500", "--reopen-delay", "0"])
                .unwrap();
        let config = cli.config();
        assert_eq!(config.termination_timeout, Duration::from_millis(500));
        assert_eq!(config.reopen_delay, Duration::ZERO);
    }

    #[test]
    fn test_stray_arguments_fall_back_to_default_restart() {
        for args in [
            vec!["replorer", r"C:\Whatever"],
            vec!["replorer", "--restart-twice"],
            vec!["replorer", "--kill-timeout", "soon"],
            vec!["replorer", "-v", "extra", "--json"],
        ] {
            let cli = Cli::parse_lenient(args.clone());
            assert!(!cli.dry_run, "{:?}", args);
            assert!(!cli.json, "{:?}", args);
            assert_eq!(cli.output_mode(), OutputMode::Quiet, "{:?}", args);
            assert_eq!(cli.config(), RestartConfig::default(), "{:?}", args);
        }
    }

    #[test]
    fn test_lenient_parse_keeps_valid_flags() {
        let cli = Cli::parse_lenient(["replorer", "-v", "--reopen-delay", "0"]);
        assert_eq!(cli.output_mode(), OutputMode::Normal);
        assert_eq!(cli.config().reopen_delay, Duration::ZERO);
    }
}
