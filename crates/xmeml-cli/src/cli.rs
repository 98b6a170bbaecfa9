//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

use xmeml_cli::pipeline::DEFAULT_OUTPUT;

#[derive(Parser)]
#[command(
    name = "xmeml",
    version,
    about = "Generate a Final Cut Pro XML sequence from a project directory",
    long_about = "Generate a Final Cut Pro XML (xmeml v4) sequence from a project directory.\n\n\
                  The directory must contain footage/, audio/ and script.docx. The first mp3 in\n\
                  audio/ becomes the voiceover; videos and images in footage/ are laid out back\n\
                  to back on one video track."
)]
pub struct Cli {
    /// Project directory containing footage/, audio/ and script.docx.
    #[arg(value_name = "PROJECT_PATH")]
    pub project_path: PathBuf,

    /// Output XML file.
    #[arg(long, short = 'o', value_name = "FILE", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// TOML configuration file (built-in defaults when omitted).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q to quieten).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q and the config file).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_output_defaults() {
        let cli = Cli::try_parse_from(["xmeml", "project"]).unwrap();
        assert_eq!(cli.project_path, PathBuf::from("project"));
        assert_eq!(cli.output, PathBuf::from(DEFAULT_OUTPUT));
        assert!(cli.config.is_none());
        assert!(cli.log_level.is_none());
    }

    #[test]
    fn test_project_path_is_required() {
        assert!(Cli::try_parse_from(["xmeml"]).is_err());
    }
}
