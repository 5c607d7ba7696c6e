use dvr_types::PortId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RouterError {
    #[error("split horizon and poison reverse can't both be enabled")]
    ConflictingSuppression,

    #[error("config error: {0}")]
    Config(String),

    #[error("port {0} is not up")]
    UnknownPort(PortId),

    #[error("invalid latency {latency} for link on {port}")]
    InvalidLinkLatency { port: PortId, latency: f64 },

    #[error("metrics error: {0}")]
    Metrics(String),
}
