//! CLI argument definitions for `smartpaymap`.

use std::path::PathBuf;

use clap::{Args, ColorChoice, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use spm_cli::logging::{LogConfig, LogFormat};
use spm_cli::overrides::Assignment;
use spm_client::{ClientSettings, Environment};
use spm_compliance::RiskFilter;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(
    name = "smartpaymap",
    version,
    about = "SmartPayMap - map payroll CSV columns to standard fields",
    long_about = "Upload payroll CSV files, review AI-suggested field mappings,\n\
                  inspect the compliance risk heatmap and simulate policy changes.\n\n\
                  All analysis runs on the SmartPayMap backend."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub api: ApiArgs,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow payroll cell values in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

impl Cli {
    /// Logging settings from the global flags.
    ///
    /// `--log-level` beats `-v`/`-q`; `RUST_LOG` applies only when neither is
    /// given. ANSI output in `auto` mode needs stderr to be a terminal and no
    /// log file.
    pub fn log_config(&self, stderr_is_terminal: bool) -> LogConfig {
        let explicit_level = self.log_level.map(LevelFilter::from);
        LogConfig {
            level_filter: explicit_level.unwrap_or_else(|| self.verbosity.tracing_level_filter()),
            use_env_filter: explicit_level.is_none() && !self.verbosity.is_present(),
            with_ansi: match self.color.color {
                ColorChoice::Always => true,
                ColorChoice::Never => false,
                ColorChoice::Auto => self.log_file.is_none() && stderr_is_terminal,
            },
            format: self.log_format.into(),
            log_file: self.log_file.clone(),
            log_data: self.log_data,
            ..LogConfig::default()
        }
    }
}

/// Backend connection flags. Unset flags fall back to the environment,
/// then the settings file.
#[derive(Args)]
pub struct ApiArgs {
    /// Backend base URL.
    #[arg(long = "base-url", value_name = "URL", global = true)]
    pub base_url: Option<String>,

    /// Deployment environment used to pick the default base URL.
    #[arg(long = "env", value_enum, global = true)]
    pub env: Option<EnvironmentArg>,

    /// Request timeout in seconds.
    #[arg(long = "timeout-secs", value_name = "SECS", global = true)]
    pub timeout_secs: Option<u64>,

    /// Settings file to read instead of the platform default.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

impl ApiArgs {
    pub fn to_settings(&self) -> ClientSettings {
        ClientSettings {
            environment: self.env.map(Environment::from),
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the first rows of a local CSV file without uploading it.
    Preview(PreviewArgs),

    /// Upload a CSV file and show what the backend parsed.
    Upload(FileArgs),

    /// Upload, analyze, adjust and submit field mappings.
    Map(MapArgs),

    /// Show the compliance risk heatmap.
    Heatmap(HeatmapArgs),

    /// Simulate the impact of a policy change on a payroll file.
    Simulate(SimulateArgs),

    /// List the standard target fields.
    Fields,

    /// List supported countries and their currencies.
    Countries,

    /// Check that the backend is reachable.
    Health,
}

#[derive(Args)]
pub struct FileArgs {
    /// Payroll CSV file.
    #[arg(value_name = "CSV")]
    pub file: PathBuf,
}

#[derive(Args)]
pub struct PreviewArgs {
    /// Payroll CSV file.
    #[arg(value_name = "CSV")]
    pub file: PathBuf,

    /// Number of data rows to show.
    #[arg(long = "rows", default_value_t = 5)]
    pub rows: usize,
}

#[derive(Args)]
pub struct MapArgs {
    /// Payroll CSV file.
    #[arg(value_name = "CSV")]
    pub file: PathBuf,

    /// Override a suggestion, as HEADER=FIELD. May be repeated.
    #[arg(long = "set", value_name = "HEADER=FIELD")]
    pub set: Vec<Assignment>,

    /// Restore the suggestion for HEADER after overrides. May be repeated.
    #[arg(long = "reset", value_name = "HEADER")]
    pub reset: Vec<String>,

    /// Request the standardized export after submitting.
    #[arg(long = "export")]
    pub export: bool,

    /// Directory for the exported file (default: current directory).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct HeatmapArgs {
    /// Only show one risk level.
    #[arg(long = "filter", value_enum, default_value = "all")]
    pub filter: FilterArg,
}

#[derive(Args)]
pub struct SimulateArgs {
    /// Payroll CSV file.
    #[arg(value_name = "CSV")]
    pub file: PathBuf,

    /// Target country code, e.g. DE.
    #[arg(long = "country", value_name = "CODE")]
    pub country: String,

    /// Currency override (default: the country's currency).
    #[arg(long = "currency", value_name = "CUR")]
    pub currency: Option<String>,

    /// Adjusted salary.
    #[arg(long = "salary", value_name = "AMOUNT")]
    pub salary: Option<String>,

    /// Free-text notes for the simulation.
    #[arg(long = "notes", value_name = "TEXT")]
    pub notes: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum EnvironmentArg {
    Development,
    Production,
}

impl From<EnvironmentArg> for Environment {
    fn from(value: EnvironmentArg) -> Self {
        match value {
            EnvironmentArg::Development => Environment::Development,
            EnvironmentArg::Production => Environment::Production,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FilterArg {
    All,
    High,
    Medium,
    Low,
}

impl From<FilterArg> for RiskFilter {
    fn from(value: FilterArg) -> Self {
        match value {
            FilterArg::All => RiskFilter::All,
            FilterArg::High => RiskFilter::High,
            FilterArg::Medium => RiskFilter::Medium,
            FilterArg::Low => RiskFilter::Low,
        }
    }
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

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => Self::ERROR,
            LogLevelArg::Warn => Self::WARN,
            LogLevelArg::Info => Self::INFO,
            LogLevelArg::Debug => Self::DEBUG,
            LogLevelArg::Trace => Self::TRACE,
        }
    }
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Compact => Self::Compact,
            LogFormatArg::Json => Self::Json,
        }
    }
}
