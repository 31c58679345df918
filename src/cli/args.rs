//! CLI argument definitions for Glossmap

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use glossmap::config::ConfigOverrides;
use logger::Level;

/// CLI log level argument
///
/// Represents log levels that can be passed via CLI arguments. Converts to lowercase
/// strings for config storage and to `logger::Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `endpoint`, `pages_dir`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Annotate an article's hard words with definitions.
    ///
    /// Fetches the article, looks up definitions for its hard-word
    /// markers and writes a standalone HTML page with ruby captions.
    Annotate {
        /// Article URL to fetch and annotate
        #[arg(value_name = "URL")]
        url: String,

        /// Output file path (optional; defaults to config `pages_dir` with a derived name)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Lay out an article's mindmap as a flow graph.
    ///
    /// Fetches the mindmap tree, flattens it into nodes and edges,
    /// computes layered positions and exports the result.
    Mindmap {
        /// Article identifier whose mindmap to fetch
        #[arg(value_name = "ARTICLE_ID")]
        article_id: String,

        /// Output file path (optional; defaults to config `maps_dir` with a derived name)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Flow direction: lr (left-to-right) or tb (top-to-bottom)
        #[arg(short, long, value_name = "DIR", default_value = "lr")]
        direction: String,

        /// Export format: json or mermaid (mmd)
        #[arg(short, long, value_name = "FORMAT", default_value = "json")]
        format: String,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "glossmap",
    about = "Glossmap command-line interface",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level (stored in config file)
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override config backend endpoint
    #[arg(long = "config-endpoint", value_name = "URL")]
    pub config_endpoint: Option<String>,

    /// Override config backend endpoint (short form)
    #[arg(long = "endpoint", value_name = "URL")]
    pub endpoint: Option<String>,

    /// Override config backend request timeout in seconds
    #[arg(long = "config-timeout-secs", value_name = "SECS")]
    pub config_timeout_secs: Option<u64>,

    /// Override config backend request timeout in seconds (short form)
    #[arg(long = "timeout-secs", value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Override config pages output directory
    #[arg(long = "config-pages-dir", value_name = "DIR")]
    pub config_pages_dir: Option<PathBuf>,

    /// Override config pages output directory (short form)
    #[arg(long = "pages-dir", value_name = "DIR")]
    pub pages_dir: Option<PathBuf>,

    /// Override config maps output directory
    #[arg(long = "config-maps-dir", value_name = "DIR")]
    pub config_maps_dir: Option<PathBuf>,

    /// Override config maps output directory (short form)
    #[arg(long = "maps-dir", value_name = "DIR")]
    pub maps_dir: Option<PathBuf>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// Transforms CLI arguments into a `ConfigOverrides` struct that can be applied to
    /// the loaded configuration. Short-form flags (e.g., `--endpoint`) take precedence
    /// over long-form flags (e.g., `--config-endpoint`) when both are provided.
    ///
    /// # Returns
    /// A `ConfigOverrides` struct with values from CLI flags, where `None` means no override.
    ///
    /// # Examples
    /// ```ignore
    /// let args = Cli::parse();
    /// let overrides = args.to_config_overrides();
    /// config.apply_overrides(&overrides);
    /// ```
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string().to_lowercase()),
            file: self
                .config_log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.config_verbose,
            endpoint: self
                .endpoint
                .clone()
                .or_else(|| self.config_endpoint.clone()),
            timeout_secs: self.timeout_secs.or(self.config_timeout_secs),
            pages_dir: self
                .pages_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string())
                .or_else(|| {
                    self.config_pages_dir
                        .as_ref()
                        .map(|p| p.to_string_lossy().to_string())
                }),
            maps_dir: self
                .maps_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string())
                .or_else(|| {
                    self.config_maps_dir
                        .as_ref()
                        .map(|p| p.to_string_lossy().to_string())
                }),
        }
    }
}
