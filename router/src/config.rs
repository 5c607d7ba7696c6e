//! Router policy configuration with TOML file support.
//!
//! The file format keeps the flat boolean switches operators are used to
//! (`split_horizon`, `poison_reverse`, ...). Loading folds the two loop
//! mitigation switches into a single [`AdvertisementSuppressionPolicy`] and
//! rejects files that turn both on.

use serde::{Deserialize, Serialize};

use crate::logging::LogFormat;
use crate::RouterError;

/// How a route is advertised back out of the port it was learned on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvertisementSuppressionPolicy {
    /// Advertise the real latency everywhere.
    None,
    /// Send nothing back toward the next hop.
    #[default]
    SplitHorizon,
    /// Send INFINITY back toward the next hop.
    PoisonReverse,
}

impl AdvertisementSuppressionPolicy {
    /// Fold the two legacy switches into one policy.
    pub fn from_flags(split_horizon: bool, poison_reverse: bool) -> Result<Self, RouterError> {
        match (split_horizon, poison_reverse) {
            (true, true) => Err(RouterError::ConflictingSuppression),
            (true, false) => Ok(Self::SplitHorizon),
            (false, true) => Ok(Self::PoisonReverse),
            (false, false) => Ok(Self::None),
        }
    }

    pub fn split_horizon(&self) -> bool {
        matches!(self, Self::SplitHorizon)
    }

    pub fn poison_reverse(&self) -> bool {
        matches!(self, Self::PoisonReverse)
    }
}

/// Configuration for a [`DvRouter`](crate::DvRouter).
///
/// Can be loaded from a TOML file via [`RouterConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq)]
pub struct RouterConfig {
    /// Seconds an unrefreshed learned route stays valid.
    pub route_ttl: f64,
    /// Split horizon, poison reverse, or neither.
    pub suppression: AdvertisementSuppressionPolicy,
    /// Keep expired routes as INFINITY for one more TTL instead of deleting them.
    pub poison_expired: bool,
    /// Greet a neighbor with our routes as soon as its link comes up.
    pub send_on_link_up: bool,
    /// Poison (rather than delete) routes whose link goes down.
    pub poison_on_link_down: bool,
    /// Log format: "human" or "json".
    pub log_format: String,
    /// Log level filter: "trace", "debug", "info", "warn", "error".
    pub log_level: String,
}

/// On-disk shape of [`RouterConfig`].
#[derive(Clone, Debug, Serialize, Deserialize)]
struct RouterConfigFile {
    #[serde(default = "default_route_ttl")]
    route_ttl: f64,

    #[serde(default = "default_true")]
    split_horizon: bool,

    #[serde(default)]
    poison_reverse: bool,

    #[serde(default)]
    poison_expired: bool,

    #[serde(default)]
    send_on_link_up: bool,

    #[serde(default)]
    poison_on_link_down: bool,

    #[serde(default = "default_log_format")]
    log_format: String,

    #[serde(default = "default_log_level")]
    log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_route_ttl() -> f64 {
    15.0
}

fn default_true() -> bool {
    true
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl RouterConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<std::path::Path>) -> Result<Self, RouterError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| RouterError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, RouterError> {
        let file: RouterConfigFile =
            toml::from_str(s).map_err(|e| RouterError::Config(e.to_string()))?;
        let config = Self {
            route_ttl: file.route_ttl,
            suppression: AdvertisementSuppressionPolicy::from_flags(
                file.split_horizon,
                file.poison_reverse,
            )?,
            poison_expired: file.poison_expired,
            send_on_link_up: file.send_on_link_up,
            poison_on_link_down: file.poison_on_link_down,
            log_format: file.log_format,
            log_level: file.log_level,
        };
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, RouterError> {
        let file = RouterConfigFile {
            route_ttl: self.route_ttl,
            split_horizon: self.suppression.split_horizon(),
            poison_reverse: self.suppression.poison_reverse(),
            poison_expired: self.poison_expired,
            send_on_link_up: self.send_on_link_up,
            poison_on_link_down: self.poison_on_link_down,
            log_format: self.log_format.clone(),
            log_level: self.log_level.clone(),
        };
        toml::to_string_pretty(&file).map_err(|e| RouterError::Config(e.to_string()))
    }

    /// Reject settings the router cannot run with.
    pub fn validate(&self) -> Result<(), RouterError> {
        if !self.route_ttl.is_finite() || self.route_ttl <= 0.0 {
            return Err(RouterError::Config(format!(
                "route_ttl must be a positive number of seconds, got {}",
                self.route_ttl
            )));
        }
        self.log_format()?;
        Ok(())
    }

    /// The parsed [`LogFormat`].
    pub fn log_format(&self) -> Result<LogFormat, RouterError> {
        self.log_format.parse()
    }

    pub fn with_suppression(mut self, suppression: AdvertisementSuppressionPolicy) -> Self {
        self.suppression = suppression;
        self
    }

    pub fn with_route_ttl(mut self, route_ttl: f64) -> Self {
        self.route_ttl = route_ttl;
        self
    }

    pub fn with_poison_expired(mut self, on: bool) -> Self {
        self.poison_expired = on;
        self
    }

    pub fn with_send_on_link_up(mut self, on: bool) -> Self {
        self.send_on_link_up = on;
        self
    }

    pub fn with_poison_on_link_down(mut self, on: bool) -> Self {
        self.poison_on_link_down = on;
        self
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            route_ttl: default_route_ttl(),
            suppression: AdvertisementSuppressionPolicy::default(),
            poison_expired: false,
            send_on_link_up: false,
            poison_on_link_down: false,
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}
