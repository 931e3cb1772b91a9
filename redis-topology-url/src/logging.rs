//! Logging setup.
//!
//! Library code only emits `tracing` events. Binaries that want them printed
//! call [`init`] once at startup (requires the `tracing-subscriber` feature).
//!
//! # Environment Variables
//!
//! - `REDIS_TOPOLOGY_DEBUG=true|1|yes` - Enable debug logging
//! - `REDIS_TOPOLOGY_LOG_LEVEL=trace|debug|info|warn|error` - Set the level
//! - `REDIS_TOPOLOGY_LOG_FORMAT=json|pretty|compact` - Output format (default: json)
//!
//! When neither the debug switch nor a level is set, [`init`] installs nothing.

use crate::env::{EnvSource, StdEnvSource};
use std::sync::Once;

/// Debug switch variable.
pub const DEBUG_VAR: &str = "REDIS_TOPOLOGY_DEBUG";
/// Log level variable.
pub const LEVEL_VAR: &str = "REDIS_TOPOLOGY_LOG_LEVEL";
/// Log format variable.
pub const FORMAT_VAR: &str = "REDIS_TOPOLOGY_LOG_FORMAT";

static INIT: Once = Once::new();

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per event.
    #[default]
    Json,
    /// Multi-line human readable output.
    Pretty,
    /// Single-line human readable output.
    Compact,
}

impl LogFormat {
    /// Get the format name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Pretty => "pretty",
            Self::Compact => "compact",
        }
    }
}

/// Logging settings read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// Whether anything was requested at all.
    pub enabled: bool,
    /// Level directive (`trace` .. `error`).
    pub level: &'static str,
    /// Output format.
    pub format: LogFormat,
}

impl LogSettings {
    /// Read settings from an environment source.
    pub fn from_env(env: &impl EnvSource) -> Self {
        let debug = env
            .get(DEBUG_VAR)
            .is_some_and(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"));
        let fallback = if debug { "debug" } else { "warn" };

        let requested = env.get(LEVEL_VAR);
        let level = match requested.as_deref().map(str::to_lowercase).as_deref() {
            Some("trace") => "trace",
            Some("debug") => "debug",
            Some("info") => "info",
            Some("warn") => "warn",
            Some("error") => "error",
            _ => fallback,
        };

        let format = match env.get(FORMAT_VAR).map(|f| f.to_lowercase()).as_deref() {
            Some("pretty") => LogFormat::Pretty,
            Some("compact") => LogFormat::Compact,
            _ => LogFormat::Json,
        };

        Self {
            enabled: debug || requested.is_some(),
            level,
            format,
        }
    }

    /// Build the `EnvFilter` directive for this crate family.
    pub fn directive(&self) -> String {
        let level = self.level;
        format!(
            "redis_topology={level},redis_topology_url={level},redis_topology_client={level},redis_topology_cli={level}"
        )
    }
}

/// Initialize logging from the process environment.
///
/// Subsequent calls are no-ops.
pub fn init() {
    init_with(LogSettings::from_env(&StdEnvSource));
}

/// Initialize logging with explicit settings.
///
/// Subsequent calls (including calls to [`init`]) are no-ops.
pub fn init_with(settings: LogSettings) {
    INIT.call_once(|| {
        if !settings.enabled {
            return;
        }

        #[cfg(feature = "tracing-subscriber")]
        {
            use tracing_subscriber::{EnvFilter, fmt, prelude::*};

            let filter = EnvFilter::try_new(settings.directive())
                .unwrap_or_else(|_| EnvFilter::new("warn"));

            match settings.format {
                LogFormat::Json => {
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(fmt::layer().json())
                        .init();
                }
                LogFormat::Compact => {
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(fmt::layer().compact())
                        .init();
                }
                LogFormat::Pretty => {
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(fmt::layer().pretty())
                        .init();
                }
            }

            tracing::info!(
                level = settings.level,
                format = settings.format.as_str(),
                "redis-topology logging initialized"
            );
        }
    });
}
