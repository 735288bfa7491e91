// Cumulative network byte counters with a tiered fallback chain

mod command;
pub mod procfs;
mod sysinfo_networks;
mod synthetic;
pub mod windows;

pub use procfs::ProcNetDev;
pub use synthetic::SyntheticCounters;
pub use sysinfo_networks::SysinfoNetworks;
pub use windows::{AdapterStatistics, WmicPerfCounters};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::time::timeout;

/// Interface name fragments that mark virtual, loopback or tunnel adapters.
const EXCLUDED_INTERFACE_FRAGMENTS: &[&str] = &[
    "loopback",
    "teredo",
    "isatap",
    "virtual",
    "vmware",
    "virtualbox",
    "hyper-v",
    "vethernet",
];

/// Returns true for interfaces that must not contribute to the host totals.
pub fn is_excluded_interface(name: &str) -> bool {
    let name = name.trim();
    if name == "lo" {
        return true;
    }
    let lower = name.to_ascii_lowercase();
    EXCLUDED_INTERFACE_FRAGMENTS
        .iter()
        .any(|fragment| lower.contains(fragment))
}

/// One raw reading from a counter tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    pub rx_bytes: u64,
    pub tx_bytes: u64,
}

impl Counters {
    pub fn add(&mut self, rx_bytes: u64, tx_bytes: u64) {
        self.rx_bytes = self.rx_bytes.saturating_add(rx_bytes);
        self.tx_bytes = self.tx_bytes.saturating_add(tx_bytes);
    }
}

/// Whether a sample came from the host or from the synthetic fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Real,
    Synthetic,
}

/// Timestamped counter reading, consumed by the rate estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterSnapshot {
    pub timestamp: Instant,
    pub rx_bytes: u64,
    pub tx_bytes: u64,
    pub source: SourceKind,
}

impl CounterSnapshot {
    pub fn new(timestamp: Instant, counters: Counters, source: SourceKind) -> Self {
        Self {
            timestamp,
            rx_bytes: counters.rx_bytes,
            tx_bytes: counters.tx_bytes,
            source,
        }
    }
}

#[derive(Debug, Error)]
pub enum AcquisitionError {
    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{program}` exited with {status}")]
    ExitStatus {
        program: String,
        status: std::process::ExitStatus,
    },
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed counter output: {0}")]
    Parse(String),
    #[error("no usable interfaces in counter output")]
    Empty,
    #[error("timed out after {0:?}")]
    TimedOut(Duration),
    #[error("counter task failed: {0}")]
    Task(String),
}

/// A host counter tier. Tiers are tried in order by [`CounterChain`].
#[async_trait]
pub trait CounterSource: Send + std::fmt::Debug {
    fn name(&self) -> &'static str;

    async fn read(&mut self) -> Result<Counters, AcquisitionError>;
}

/// Ordered real tiers followed by the synthetic tier, which cannot fail.
#[derive(Debug)]
pub struct CounterChain {
    tiers: Vec<Box<dyn CounterSource>>,
    fallback: SyntheticCounters,
    tier_timeout: Duration,
    degraded: bool,
    last_real: Option<Counters>,
}

impl CounterChain {
    pub fn new(
        tiers: Vec<Box<dyn CounterSource>>,
        fallback: SyntheticCounters,
        tier_timeout: Duration,
    ) -> Self {
        Self {
            tiers,
            fallback,
            tier_timeout,
            degraded: false,
            last_real: None,
        }
    }

    pub fn tier_names(&self) -> Vec<&'static str> {
        self.tiers.iter().map(|t| t.name()).collect()
    }

    /// Reads the first tier that succeeds within the timeout. The timestamp is
    /// taken after acquisition for every tier, synthetic included.
    pub async fn sample(&mut self) -> CounterSnapshot {
        for tier in self.tiers.iter_mut() {
            let name = tier.name();
            let result = match timeout(self.tier_timeout, tier.read()).await {
                Ok(r) => r,
                Err(_) => Err(AcquisitionError::TimedOut(self.tier_timeout)),
            };
            match result {
                Ok(counters) => {
                    if self.degraded {
                        tracing::info!(tier = name, "network counters recovered");
                        self.degraded = false;
                    }
                    self.last_real = Some(counters);
                    return CounterSnapshot::new(Instant::now(), counters, SourceKind::Real);
                }
                Err(e) => {
                    tracing::debug!(
                        error = %e,
                        tier = name,
                        operation = "read_counters",
                        "counter tier failed, trying next"
                    );
                }
            }
        }

        if self.degraded {
            tracing::debug!("network counters still synthetic");
        } else {
            tracing::warn!(
                tiers = ?self.tier_names(),
                "all network counter tiers failed; reporting synthetic counters"
            );
            self.degraded = true;
            if let Some(last) = self.last_real {
                self.fallback.resume_from(last);
            }
        }
        let counters = self.fallback.advance();
        CounterSnapshot::new(Instant::now(), counters, SourceKind::Synthetic)
    }
}

/// Tier list for the platform this binary was built for.
pub fn platform_chain(tier_timeout: Duration) -> CounterChain {
    let tiers: Vec<Box<dyn CounterSource>> = if cfg!(target_os = "windows") {
        vec![
            Box::new(WmicPerfCounters),
            Box::new(AdapterStatistics),
        ]
    } else {
        vec![
            Box::new(ProcNetDev::default()),
            Box::new(SysinfoNetworks::new()),
        ]
    };
    CounterChain::new(tiers, SyntheticCounters::from_os_rng(), tier_timeout)
}
