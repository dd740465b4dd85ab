//! Logging configuration and initialization
//!
//! Centralized logging setup using the `tracing` ecosystem. Parse
//! diagnostics (unknown keywords, unknown values) and allocation events are
//! emitted through `tracing`, so callers that want them on stderr only need
//! to call [`init_logging_default`] once at startup.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: standard tracing filter (e.g. "info", "debug,dnnmark=trace")
//! - `DNNMARK_LOG_LEVEL`: simple log level (error, warn, info, debug, trace)
//! - `DNNMARK_LOG_FORMAT`: output format ("human" or "json")

use once_cell::sync::OnceCell;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Global flag so the subscriber is only installed once
static TRACING_INITIALIZED: OnceCell<()> = OnceCell::new();

const LOG_LEVEL_ENV: &str = "DNNMARK_LOG_LEVEL";
const LOG_FORMAT_ENV: &str = "DNNMARK_LOG_FORMAT";

/// Log level enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Parse from string, case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "error" => Some(LogLevel::Error),
            "warn" | "warning" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }

    /// Convert to an EnvFilter directive.
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable console output (default)
    #[default]
    Human,
    /// JSON structured output
    Json,
}

impl LogFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "human" | "pretty" | "console" => Some(LogFormat::Human),
            "json" | "structured" => Some(LogFormat::Json),
            _ => None,
        }
    }
}

/// Initialize logging from the environment.
///
/// Reads `RUST_LOG` first (standard tracing convention), then
/// `DNNMARK_LOG_LEVEL`, defaulting to `warn`. `DNNMARK_LOG_FORMAT` selects
/// human or JSON output. Idempotent: later calls are no-ops.
pub fn init_logging_default() {
    TRACING_INITIALIZED.get_or_init(|| {
        let level = std::env::var(LOG_LEVEL_ENV)
            .ok()
            .and_then(|s| LogLevel::parse(&s))
            .unwrap_or_default();
        let format = std::env::var(LOG_FORMAT_ENV)
            .ok()
            .and_then(|s| LogFormat::parse(&s))
            .unwrap_or_default();

        let env_filter = match std::env::var("RUST_LOG") {
            Ok(rust_log) => {
                EnvFilter::try_new(rust_log).unwrap_or_else(|_| EnvFilter::new(level.as_filter_str()))
            }
            Err(_) => EnvFilter::new(level.as_filter_str()),
        };

        match format {
            LogFormat::Json => {
                let layer = fmt::layer().json().with_target(false);
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(layer)
                    .init();
            }
            LogFormat::Human => {
                let layer = fmt::layer().with_target(true);
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(layer)
                    .init();
            }
        }
    });
}

/// Check if tracing has been initialized
pub fn is_initialized() -> bool {
    TRACING_INITIALIZED.get().is_some()
}
