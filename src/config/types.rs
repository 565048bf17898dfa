//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    CACHE_MAX_BYTES, CACHE_PURGE_INTERVAL_SECS, CACHE_TTL, CONNECTION_TIMEOUT_SECS, DEFAULT_FAVICON_LOC,
    DEFAULT_LISTEN_ADDR, DEFAULT_USER_AGENT, MAX_RESPONSE_BODY_SIZE, REQUEST_TIMEOUT_SECS,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Library configuration (no CLI dependencies).
///
/// This is the core configuration struct used by the library. It can be
/// constructed programmatically without any CLI dependencies.
///
/// # Examples
///
/// ```no_run
/// use favicon_service::Config;
///
/// let config = Config {
///     request_timeout_secs: 5,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to
    pub listen_addr: SocketAddr,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Per-connection timeout in seconds
    pub connection_timeout_secs: u64,

    /// Total budget for one resolution in seconds
    pub request_timeout_secs: u64,

    /// Lifetime of location cache entries
    pub cache_ttl: Duration,

    /// Interval between sweeps of expired cache entries, in seconds
    pub cache_purge_interval_secs: u64,

    /// Memory budget of the in-process cache, in bytes
    pub cache_max_bytes: usize,

    /// Location reported for the default icon
    pub default_icon_location: String,

    /// Optional file to load the default icon from (bundled PNG otherwise)
    pub default_icon_file: Option<PathBuf>,

    /// Largest response body the fetcher will buffer
    pub max_body_size: usize,
}

impl Config {
    /// Per-connection timeout as a `Duration`.
    pub fn connection_timeout(&self) -> Duration {
        Duration::from_secs(self.connection_timeout_secs)
    }

    /// Total request budget as a `Duration`.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR
                .parse()
                .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 8080))),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            connection_timeout_secs: CONNECTION_TIMEOUT_SECS,
            request_timeout_secs: REQUEST_TIMEOUT_SECS,
            cache_ttl: CACHE_TTL,
            cache_purge_interval_secs: CACHE_PURGE_INTERVAL_SECS,
            cache_max_bytes: CACHE_MAX_BYTES,
            default_icon_location: DEFAULT_FAVICON_LOC.to_string(),
            default_icon_file: None,
            max_body_size: MAX_RESPONSE_BODY_SIZE,
        }
    }
}

/// Command-line options.
///
/// This struct is automatically generated by `clap` from the field attributes.
/// All options have defaults and can be overridden via command-line flags.
///
/// # Examples
///
/// ```bash
/// # Basic usage
/// favicon_service
///
/// # Listen on all interfaces with a shorter budget
/// favicon_service --listen 0.0.0.0:8080 --request-timeout-secs 10
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "favicon_service",
    about = "Resolves website favicons through a cached fallback chain."
)]
pub struct Opt {
    /// Address to listen on
    #[arg(long = "listen", default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Per-connection timeout in seconds
    #[arg(long, default_value_t = CONNECTION_TIMEOUT_SECS)]
    pub connection_timeout_secs: u64,

    /// Total time budget per favicon request in seconds
    #[arg(long, default_value_t = REQUEST_TIMEOUT_SECS)]
    pub request_timeout_secs: u64,

    /// Location cache TTL in seconds (default: 28 days)
    #[arg(long, default_value_t = CACHE_TTL.as_secs())]
    pub cache_ttl_secs: u64,

    /// Memory budget of the location cache in bytes (default: 64MB)
    #[arg(long, default_value_t = CACHE_MAX_BYTES)]
    pub cache_max_bytes: usize,

    /// Location reported for the default icon
    #[arg(long, default_value = DEFAULT_FAVICON_LOC)]
    pub default_icon_location: String,

    /// Load the default icon from this file instead of the bundled PNG
    #[arg(long, env = "FAVICON_DEFAULT_ICON_FILE")]
    pub default_icon_file: Option<PathBuf>,
}

impl From<Opt> for Config {
    fn from(opt: Opt) -> Self {
        Self {
            listen_addr: opt.listen_addr,
            log_level: opt.log_level,
            log_format: opt.log_format,
            user_agent: opt.user_agent,
            connection_timeout_secs: opt.connection_timeout_secs,
            request_timeout_secs: opt.request_timeout_secs,
            cache_ttl: Duration::from_secs(opt.cache_ttl_secs),
            cache_max_bytes: opt.cache_max_bytes,
            default_icon_location: opt.default_icon_location,
            default_icon_file: opt.default_icon_file,
            ..Config::default()
        }
    }
}
