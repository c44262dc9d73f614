//! Service configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`).
//!
//! | Key                     | Default        |
//! |-------------------------|----------------|
//! | `LISTEN_ADDR`           | `0.0.0.0:3000` |
//! | `EVENT_BUS_CAPACITY`    | `10000`        |
//! | `MAX_TICKETS_PER_EVENT` | `5`            |
//! | `SEED_DEMO_DATA`        | `false`        |
//! | `REQUEST_TIMEOUT_SECS`  | `30`           |
//! | `LOG_FORMAT`            | `pretty`       |

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, bail};

use crate::service::DEFAULT_PURCHASE_LIMIT;

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable multi-field lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => bail!("unknown LOG_FORMAT '{other}' (expected 'pretty' or 'json')"),
        }
    }
}

/// Top-level service configuration.
///
/// Loaded once at startup via [`NexusConfig::from_env`].
#[derive(Debug, Clone)]
pub struct NexusConfig {
    /// Socket address to bind the HTTP server to.
    pub listen_addr: SocketAddr,

    /// Capacity of the activity broadcast channel.
    pub event_bus_capacity: usize,

    /// Maximum tickets one user may hold per event.
    pub max_tickets_per_event: usize,

    /// Load the demo catalog at startup.
    pub seed_demo_data: bool,

    /// Per-request timeout applied to REST routes.
    pub request_timeout: Duration,

    /// Log line format.
    pub log_format: LogFormat,
}

impl Default for NexusConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            event_bus_capacity: 10_000,
            max_tickets_per_event: DEFAULT_PURCHASE_LIMIT,
            seed_demo_data: false,
            request_timeout: Duration::from_secs(30),
            log_format: LogFormat::Pretty,
        }
    }
}

impl NexusConfig {
    /// Loads configuration from the process environment.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file
    /// first.
    ///
    /// # Errors
    ///
    /// See [`NexusConfig::from_lookup`].
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup, falling back to
    /// defaults for absent or unparsable keys.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed, or
    /// if `MAX_TICKETS_PER_EVENT` is zero.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let listen_addr = match lookup("LISTEN_ADDR") {
            Some(raw) => raw
                .trim()
                .parse::<SocketAddr>()
                .with_context(|| format!("invalid LISTEN_ADDR value '{raw}'"))?,
            None => defaults.listen_addr,
        };

        let max_tickets_per_event = parse_or(
            &lookup,
            "MAX_TICKETS_PER_EVENT",
            defaults.max_tickets_per_event,
        );
        if max_tickets_per_event == 0 {
            bail!("MAX_TICKETS_PER_EVENT must be at least 1");
        }

        let event_bus_capacity =
            parse_or(&lookup, "EVENT_BUS_CAPACITY", defaults.event_bus_capacity);
        let seed_demo_data = lookup("SEED_DEMO_DATA")
            .as_deref()
            .and_then(parse_bool)
            .unwrap_or(defaults.seed_demo_data);
        let timeout_secs = parse_or(
            &lookup,
            "REQUEST_TIMEOUT_SECS",
            defaults.request_timeout.as_secs(),
        );
        let log_format = parse_or(&lookup, "LOG_FORMAT", defaults.log_format);

        Ok(Self {
            listen_addr,
            event_bus_capacity,
            max_tickets_per_event,
            seed_demo_data,
            request_timeout: Duration::from_secs(timeout_secs),
            log_format,
        })
    }
}

/// Parses `key` as `T`, returning `default` on missing or invalid values.
fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    lookup(key)
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(default)
}

/// Accepts `true`/`1`/`yes` and `false`/`0`/`no`, case-insensitive.
fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
