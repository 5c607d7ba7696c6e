//! Tracing setup for the replay tool and anything else embedding a router.
//!
//! Router handlers log per-route decisions at `debug` and link changes at
//! `info`; this module only decides where those records go. Output is
//! always stderr, leaving stdout to the replay tool's emitted JSON lines.
//! `RUST_LOG` wins over the configured level when set.

use std::str::FromStr;

use tracing_subscriber::EnvFilter;

use crate::RouterError;

/// Rendering of log records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Plain text lines.
    Human,
    /// One JSON object per record.
    Json,
}

impl FromStr for LogFormat {
    type Err = RouterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            other => Err(RouterError::Config(format!("unknown log format: {other}"))),
        }
    }
}

fn level_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Install the process-wide subscriber. Call once; a second call panics.
pub fn init_logging(format: LogFormat, level: &str) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(level_filter(level))
        .with_writer(std::io::stderr)
        .with_target(true);

    match format {
        LogFormat::Human => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}
