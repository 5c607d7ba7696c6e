//! Distance-vector routing core.
//!
//! One [`DvRouter`] runs on one node. It keeps the best-known route to every
//! reachable destination, relaxes routes as neighbors advertise theirs, and
//! decides what to advertise back:
//! - Relaxation with next-hop authority ([`update`])
//! - Triggered and periodic advertisements with split horizon or poison
//!   reverse ([`advertise`])
//! - TTL-based expiry with optional poisoning ([`expire`])
//! - Link up/down handling, static hosts and data forwarding ([`router`])
//!
//! Everything outside the decision logic (clock, links, event loop) is
//! reached through [`dvr_types::Environment`].

pub mod advertise;
pub mod config;
pub mod error;
pub mod event;
pub mod expire;
pub mod history;
pub mod logging;
pub mod metrics;
pub mod ports;
pub mod router;
pub mod table;
pub mod update;

pub use config::{AdvertisementSuppressionPolicy, RouterConfig};
pub use error::RouterError;
pub use event::RouterEvent;
pub use expire::ExpireReport;
pub use history::{AdvertisementHistory, SentRoute};
pub use logging::{init_logging, LogFormat};
pub use metrics::RouterMetrics;
pub use ports::PortRegistry;
pub use router::{DvRouter, ForwardOutcome};
pub use table::{RouteEntry, RouteTable};
pub use update::RelaxOutcome;
