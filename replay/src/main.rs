//! dvr-replay — feed a scripted event trace through one router.
//!
//! The script is newline-delimited JSON, one timed event per line:
//!
//! ```text
//! {"at": 0.0, "event": "link_up", "port": 3, "latency": 1.0}
//! {"at": 1.0, "event": "advertisement_received", "destination": "z", "latency": 2.0, "port": 3}
//! {"at": 5.0, "event": "timer_tick"}
//! ```
//!
//! Everything the router emits is written to stdout as JSON lines; logs go
//! to stderr.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use dvr_router::{init_logging, AdvertisementSuppressionPolicy, DvRouter, RouterConfig, RouterEvent};
use dvr_types::{DataPacket, Environment, HostId, Latency, PortId, RouteAdvertisement, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "dvr-replay", about = "Replay an event trace through a distance-vector router")]
struct Cli {
    /// Event script (JSON lines). Reads stdin when omitted.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Path to a TOML router configuration file. CLI flags override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seconds before an unrefreshed route goes stale.
    #[arg(long, env = "DVR_ROUTE_TTL")]
    route_ttl: Option<f64>,

    /// Loop mitigation: "none", "split-horizon" or "poison-reverse".
    #[arg(long, env = "DVR_SUPPRESSION")]
    suppression: Option<String>,

    /// Print the final route table after the script finishes.
    #[arg(long)]
    dump_table: bool,

    /// Print Prometheus metrics after the script finishes.
    #[arg(long)]
    metrics: bool,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "DVR_LOG_LEVEL")]
    log_level: Option<String>,
}

/// One line of the input script.
#[derive(Debug, Deserialize)]
struct ScriptLine {
    at: f64,
    #[serde(flatten)]
    event: RouterEvent,
}

/// One line of output.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Emitted {
    Advertisement {
        at: f64,
        port: PortId,
        destination: HostId,
        latency: Latency,
    },
    Packet {
        at: f64,
        port: PortId,
        packet: DataPacket,
    },
    Route {
        destination: HostId,
        next_hop: PortId,
        latency: Latency,
        expires: String,
    },
}

/// Environment whose clock is driven by the script and whose wire is a
/// buffer flushed after every event.
#[derive(Debug)]
struct ReplayEnvironment {
    now: Timestamp,
    outbox: Vec<Emitted>,
}

impl Environment for ReplayEnvironment {
    fn current_time(&self) -> Timestamp {
        self.now
    }

    fn send(&mut self, packet: DataPacket, port: PortId) {
        self.outbox.push(Emitted::Packet {
            at: self.now.as_secs(),
            port,
            packet,
        });
    }

    fn send_route_advertisement(&mut self, port: PortId, advertisement: RouteAdvertisement) {
        self.outbox.push(Emitted::Advertisement {
            at: self.now.as_secs(),
            port,
            destination: advertisement.destination,
            latency: advertisement.latency,
        });
    }
}

fn parse_suppression(s: &str) -> anyhow::Result<AdvertisementSuppressionPolicy> {
    match s.to_lowercase().replace('_', "-").as_str() {
        "none" => Ok(AdvertisementSuppressionPolicy::None),
        "split-horizon" => Ok(AdvertisementSuppressionPolicy::SplitHorizon),
        "poison-reverse" => Ok(AdvertisementSuppressionPolicy::PoisonReverse),
        other => anyhow::bail!("unknown suppression policy: {other}"),
    }
}

fn write_lines(out: &mut impl Write, lines: impl IntoIterator<Item = Emitted>) -> anyhow::Result<()> {
    for line in lines {
        serde_json::to_writer(&mut *out, &line)?;
        writeln!(out)?;
    }
    Ok(())
}

/// Run `script` through a fresh router, writing emitted traffic to `out`.
fn replay(
    config: RouterConfig,
    script: impl BufRead,
    out: &mut impl Write,
) -> anyhow::Result<DvRouter<ReplayEnvironment>> {
    let env = ReplayEnvironment {
        now: Timestamp::EPOCH,
        outbox: Vec::new(),
    };
    let mut router = DvRouter::new(config, env)?;

    for (idx, line) in script.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let step: ScriptLine = serde_json::from_str(trimmed)
            .with_context(|| format!("script line {}: malformed event", idx + 1))?;
        if step.at < router.env().now.as_secs() {
            anyhow::bail!("script line {}: time goes backwards", idx + 1);
        }
        router.env_mut().now = Timestamp::new(step.at);
        router
            .handle_event(step.event)
            .with_context(|| format!("script line {}", idx + 1))?;
        let emitted = std::mem::take(&mut router.env_mut().outbox);
        write_lines(out, emitted)?;
    }
    Ok(router)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(ref path) => RouterConfig::from_toml_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => RouterConfig::default(),
    };
    if let Some(ttl) = cli.route_ttl {
        config.route_ttl = ttl;
    }
    if let Some(ref s) = cli.suppression {
        config.suppression = parse_suppression(s)?;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    config.validate()?;
    init_logging(config.log_format()?, &config.log_level);

    tracing::info!(
        route_ttl = config.route_ttl,
        suppression = ?config.suppression,
        "starting replay"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let router = match cli.script {
        Some(ref path) => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            replay(config, BufReader::new(file), &mut out)?
        }
        None => replay(config, io::stdin().lock(), &mut out)?,
    };

    if cli.dump_table {
        let routes = router.table().iter().map(|entry| Emitted::Route {
            destination: entry.destination.clone(),
            next_hop: entry.next_hop,
            latency: entry.latency,
            expires: entry.expires.to_string(),
        });
        write_lines(&mut out, routes)?;
    }
    if cli.metrics {
        write!(out, "{}", router.metrics().encode()?)?;
    }

    tracing::info!(routes = router.table().len(), "replay finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = r#"
# two neighbors, one learned route
{"at": 0.0, "event": "link_up", "port": 3, "latency": 1.0}
{"at": 0.0, "event": "link_up", "port": 4, "latency": 0.5}
{"at": 1.0, "event": "advertisement_received", "destination": "z", "latency": 2.0, "port": 3}
{"at": 2.0, "event": "data_packet_arrived", "packet": {"source": "a", "destination": "z"}, "port": 4}
"#;

    #[test]
    fn replays_script_and_emits_json_lines() {
        let mut out = Vec::new();
        let router = replay(RouterConfig::default(), SCRIPT.as_bytes(), &mut out).unwrap();

        let entry = router.table().get(&HostId::new("z")).unwrap();
        assert_eq!(entry.next_hop, PortId::new(3));

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["kind"], "advertisement");
        assert_eq!(lines[0]["port"], 4);
        assert_eq!(lines[0]["destination"], "z");
        assert_eq!(lines[0]["latency"], 3.0);
        assert_eq!(lines[1]["kind"], "packet");
        assert_eq!(lines[1]["port"], 3);
    }

    #[test]
    fn rejects_time_travel() {
        let script = r#"{"at": 5.0, "event": "timer_tick"}
{"at": 1.0, "event": "timer_tick"}"#;
        let err = replay(RouterConfig::default(), script.as_bytes(), &mut Vec::<u8>::new()).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn surfaces_unknown_port() {
        let script = r#"{"at": 0.0, "event": "link_down", "port": 1}
{"at": 1.0, "event": "advertisement_received", "destination": "z", "latency": 2.0, "port": 1}"#;
        let err = replay(RouterConfig::default(), script.as_bytes(), &mut Vec::<u8>::new()).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn suppression_names() {
        assert_eq!(
            parse_suppression("poison_reverse").unwrap(),
            AdvertisementSuppressionPolicy::PoisonReverse
        );
        assert!(parse_suppression("both").is_err());
    }
}
