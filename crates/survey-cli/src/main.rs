//! Weekly survey auto-report CLI.

use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;
use tracing::{debug, error};

use survey_cli::config::AppConfig;
use survey_cli::logging::{LogConfig, LogFormat, init_logging};
use survey_cli::pipeline::run_pipeline;
use survey_notify::EmailNotifier;
use survey_report::read_health;

mod cli;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::summary::print_summary;

const EXIT_OK: i32 = 0;
const EXIT_BAD_ARGS: i32 = 1;
const EXIT_PIPELINE_FAILED: i32 = 2;
const EXIT_CONFIG_INVALID: i32 = 3;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            let code = if err.use_stderr() { EXIT_BAD_ARGS } else { EXIT_OK };
            std::process::exit(code);
        }
    };
    cli.color.write_global();

    let config = AppConfig::load(&cli.config);
    let log_file = cli
        .log_file
        .clone()
        .or_else(|| config.as_ref().ok().map(AppConfig::log_file));
    if let Err(error) = setup_logging(&cli, log_file) {
        eprintln!("error: {error:#}");
        std::process::exit(EXIT_BAD_ARGS);
    }

    let config = match config.and_then(|config| config.ensure_dirs().map(|()| config)) {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "config error");
            println!("Config error: {err}");
            std::process::exit(EXIT_CONFIG_INVALID);
        }
    };
    debug!(config = %cli.config.display(), "config loaded");

    std::process::exit(run_command(&cli.command, &config));
}

fn run_command(command: &Command, config: &AppConfig) -> i32 {
    match command {
        Command::ValidateConfig => {
            println!("Config loaded OK and directories ensured.");
            EXIT_OK
        }
        Command::Status => {
            print_status(&config.output_dir);
            EXIT_OK
        }
        Command::Run(args) => {
            let notifier = EmailNotifier::new(config.email.clone());
            let outcome = run_pipeline(config, &notifier, args.dry_run);
            print_summary(&outcome);
            if outcome.ok {
                EXIT_OK
            } else {
                EXIT_PIPELINE_FAILED
            }
        }
    }
}

fn setup_logging(cli: &Cli, log_file: Option<PathBuf>) -> Result<()> {
    let config = log_config_from_cli(cli, log_file);
    let target = config
        .log_file
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "stderr".to_string());
    init_logging(&config).with_context(|| format!("failed to initialize logging to {target}"))
}

fn print_status(output_dir: &Path) {
    match read_health(output_dir) {
        Some(line) => println!("{line}"),
        None => println!("No health file found yet. Run: weekly-report run"),
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli, log_file: Option<PathBuf>) -> LogConfig {
    let level_filter = match cli.log_level {
        Some(LogLevelArg::Error) => LevelFilter::ERROR,
        Some(LogLevelArg::Warn) => LevelFilter::WARN,
        Some(LogLevelArg::Info) => LevelFilter::INFO,
        Some(LogLevelArg::Debug) => LevelFilter::DEBUG,
        Some(LogLevelArg::Trace) => LevelFilter::TRACE,
        None => cli.verbosity.tracing_level_filter(),
    };
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let mut config = LogConfig::default()
        .with_level(level_filter)
        .with_format(format)
        .with_log_file(log_file);
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => io::stderr().is_terminal(),
    };
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_log_level_overrides_verbosity() {
        let cli = Cli::parse_from([
            "weekly-report",
            "-v",
            "--log-level",
            "warn",
            "--log-format",
            "json",
            "--color",
            "never",
            "status",
        ]);
        let config = log_config_from_cli(&cli, Some(PathBuf::from("logs/app.log")));
        assert_eq!(config.level_filter, LevelFilter::WARN);
        assert!(matches!(config.format, LogFormat::Json));
        assert_eq!(config.log_file, Some(PathBuf::from("logs/app.log")));
        assert!(!config.use_env_filter);
        assert!(!config.with_ansi);
    }

    #[test]
    fn test_default_flags_defer_to_env_filter() {
        let cli = Cli::parse_from(["weekly-report", "status"]);
        let config = log_config_from_cli(&cli, None);
        assert_eq!(config.level_filter, LevelFilter::INFO);
        assert!(matches!(config.format, LogFormat::Pretty));
        assert!(config.use_env_filter);
        assert_eq!(config.log_file, None);
    }
}
