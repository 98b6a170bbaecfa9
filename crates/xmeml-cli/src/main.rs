//! xmeml project generator CLI.

use std::io::{self, IsTerminal};
use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::{ColorChoice, Parser};
use tracing::error;
use tracing::level_filters::LevelFilter;

use xmeml_cli::logging::{LogConfig, LogFormat, init_logging};
use xmeml_cli::pipeline::run;
use xmeml_ingest::FfprobeProbe;
use xmeml_model::ProjectConfig;

mod cli;
mod summary;

use crate::cli::{Cli, LogFormatArg, LogLevelArg};
use crate::summary::print_summary;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("error: {error:#}");
            std::process::exit(1);
        }
    };
    let log_config = match log_config_from_cli(&cli, &config) {
        Ok(log_config) => log_config,
        Err(error) => {
            eprintln!("error: {error:#}");
            std::process::exit(1);
        }
    };
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    let probe = FfprobeProbe::new(&config.media.ffprobe);
    let exit_code = match run(&cli.project_path, &cli.output, &config, &probe) {
        Ok(report) => {
            print_summary(&report);
            0
        }
        Err(error) => {
            error!("{error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn load_config(path: Option<&Path>) -> Result<ProjectConfig> {
    match path {
        Some(path) => ProjectConfig::load(path).context("failed to load configuration"),
        None => Ok(ProjectConfig::default()),
    }
}

/// Build logging configuration. Precedence: `--log-level`, then `-v/-q`,
/// then `[logging] level`, then `RUST_LOG`, then the verbosity default.
fn log_config_from_cli(cli: &Cli, config: &ProjectConfig) -> Result<LogConfig> {
    let mut log_config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    log_config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());

    if let Some(level) = cli.log_level {
        log_config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    } else if !cli.verbosity.is_present()
        && let Some(level) = &config.logging.level
    {
        let Ok(parsed) = level.parse::<LevelFilter>() else {
            bail!("invalid [logging] level '{level}'");
        };
        log_config.level_filter = parsed;
        log_config.use_env_filter = false;
    }

    log_config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    log_config.log_file = cli.log_file.clone();
    log_config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    Ok(log_config)
}
