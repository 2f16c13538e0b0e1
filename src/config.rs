//! Configuration Module
//!
//! Loads server configuration from command line flags, falling back to
//! environment variables and then to built-in defaults.

use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use clap::Parser;
use thiserror::Error;

// == Config Error ==
/// Errors raised while loading or validating configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unable to parse log level: {0}")]
    InvalidLogLevel(String),

    #[error("unable to parse duration: {0}")]
    InvalidDuration(String),

    #[error("cache size must be greater than zero")]
    ZeroCapacity,

    #[error("default cache TTL must be positive")]
    NonPositiveTtl,
}

// == Log Level ==
/// Minimum level of emitted log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Directive form understood by `tracing_subscriber::EnvFilter`.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Config ==
/// Server configuration parameters.
///
/// Every value can be set by flag or environment variable; flags win.
#[derive(Debug, Clone, Parser)]
#[command(name = "lru_cache_server")]
#[command(about = "In-memory LRU cache server with per-entry TTL")]
#[command(version)]
pub struct Config {
    /// Address the HTTP server binds to
    #[arg(long = "server-host-port", env = "SERVER_HOST_PORT", default_value = "localhost:8080")]
    pub host_port: String,

    /// Maximum number of entries the cache can hold
    #[arg(long = "cache-size", env = "CACHE_SIZE", default_value_t = 10)]
    pub cache_size: usize,

    /// TTL applied when a request carries none (e.g. 90s, 1m, 1h30m)
    #[arg(
        long = "default-cache-ttl",
        env = "DEFAULT_CACHE_TTL",
        default_value = "1m",
        value_parser = parse_duration
    )]
    pub default_ttl: Duration,

    /// One of DEBUG, INFO, WARN, ERROR
    #[arg(long = "log-level", env = "LOG_LEVEL", default_value = "WARN", value_parser = LogLevel::from_str)]
    pub log_level: LogLevel,
}

impl Config {
    /// Checks the constraints clap cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache_size == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.default_ttl <= Duration::zero() {
            return Err(ConfigError::NonPositiveTtl);
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host_port: "localhost:8080".to_string(),
            cache_size: 10,
            default_ttl: Duration::minutes(1),
            log_level: LogLevel::Warn,
        }
    }
}

// == Duration Parsing ==
/// Parses Go-style durations: an optional sign, then one or more decimal
/// numbers each followed by a unit (`ns`, `us`/`µs`, `ms`, `s`, `m`, `h`),
/// as in `300ms`, `-1.5h` or `2h45m`.
///
/// A bare integer is read as whole seconds.
pub fn parse_duration(input: &str) -> Result<Duration, ConfigError> {
    let invalid = || ConfigError::InvalidDuration(input.to_string());
    let text = input.trim();

    if let Ok(secs) = text.parse::<i64>() {
        return Duration::try_seconds(secs).ok_or_else(invalid);
    }

    let (negative, mut rest) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    if rest.is_empty() {
        return Err(invalid());
    }

    let mut total_ns: i128 = 0;
    while !rest.is_empty() {
        let (whole, tail) = split_digits(rest);
        let (fraction, tail) = match tail.strip_prefix('.') {
            Some(tail) => split_digits(tail),
            None => ("", tail),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }

        let unit_len = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_len);
        let unit_ns: i128 = match unit {
            "ns" => 1,
            "us" | "µs" | "μs" => 1_000,
            "ms" => 1_000_000,
            "s" => 1_000_000_000,
            "m" => 60_000_000_000,
            "h" => 3_600_000_000_000,
            _ => return Err(invalid()),
        };
        rest = tail;

        let whole_ns = match whole {
            "" => 0,
            digits => digits
                .parse::<i128>()
                .ok()
                .and_then(|n| n.checked_mul(unit_ns))
                .ok_or_else(invalid)?,
        };
        // Fraction digits past the eighteenth are ignored.
        let fraction = &fraction[..fraction.len().min(18)];
        let fraction_ns = match fraction {
            "" => 0,
            digits => {
                let scale = 10_i128.pow(digits.len() as u32);
                digits.parse::<i128>().map_err(|_| invalid())? * unit_ns / scale
            }
        };

        total_ns = total_ns
            .checked_add(whole_ns)
            .and_then(|ns| ns.checked_add(fraction_ns))
            .filter(|ns| *ns <= i64::MAX as i128)
            .ok_or_else(invalid)?;
    }

    let nanos = i64::try_from(total_ns).map_err(|_| invalid())?;
    Ok(Duration::nanoseconds(if negative { -nanos } else { nanos }))
}

/// Splits a leading run of ASCII digits off `text`.
fn split_digits(text: &str) -> (&str, &str) {
    let len = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    text.split_at(len)
}
