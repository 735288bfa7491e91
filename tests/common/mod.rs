// Shared test helpers: scripted counter tiers and snapshot builders

#![allow(dead_code)]

use async_trait::async_trait;
use hostmetrics::counters::{
    AcquisitionError, CounterChain, CounterSnapshot, CounterSource, Counters, SourceKind,
    SyntheticCounters,
};
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Tier that always fails and counts how often it was asked.
#[derive(Debug, Default)]
pub struct FailingSource {
    pub calls: Arc<AtomicUsize>,
}

#[async_trait]
impl CounterSource for FailingSource {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn read(&mut self) -> Result<Counters, AcquisitionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(AcquisitionError::Parse("simulated failure".into()))
    }
}

/// Tier that never answers within any reasonable timeout.
#[derive(Debug, Default)]
pub struct StalledSource;

#[async_trait]
impl CounterSource for StalledSource {
    fn name(&self) -> &'static str {
        "stalled"
    }

    async fn read(&mut self) -> Result<Counters, AcquisitionError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(Counters::default())
    }
}

/// Tier that replays a fixed list of readings, then fails.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    readings: VecDeque<Counters>,
}

impl ScriptedSource {
    pub fn new(readings: &[(u64, u64)]) -> Self {
        Self {
            readings: readings
                .iter()
                .map(|&(rx_bytes, tx_bytes)| Counters { rx_bytes, tx_bytes })
                .collect(),
        }
    }
}

#[async_trait]
impl CounterSource for ScriptedSource {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn read(&mut self) -> Result<Counters, AcquisitionError> {
        self.readings.pop_front().ok_or(AcquisitionError::Empty)
    }
}

/// Tier that replays readings where `None` is a failed read; fails once drained.
#[derive(Debug, Default)]
pub struct FlakySource {
    readings: VecDeque<Option<Counters>>,
}

impl FlakySource {
    pub fn new(readings: &[Option<(u64, u64)>]) -> Self {
        Self {
            readings: readings
                .iter()
                .map(|r| r.map(|(rx_bytes, tx_bytes)| Counters { rx_bytes, tx_bytes }))
                .collect(),
        }
    }
}

#[async_trait]
impl CounterSource for FlakySource {
    fn name(&self) -> &'static str {
        "flaky"
    }

    async fn read(&mut self) -> Result<Counters, AcquisitionError> {
        match self.readings.pop_front() {
            Some(Some(counters)) => Ok(counters),
            Some(None) => Err(AcquisitionError::Parse("simulated outage".into())),
            None => Err(AcquisitionError::Empty),
        }
    }
}

pub fn chain(tiers: Vec<Box<dyn CounterSource>>) -> CounterChain {
    CounterChain::new(tiers, SyntheticCounters::seeded(7), Duration::from_millis(200))
}

pub fn snapshot_at(base: Instant, offset_secs: f64, rx: u64, tx: u64) -> CounterSnapshot {
    snapshot_from(base, offset_secs, rx, tx, SourceKind::Real)
}

pub fn snapshot_from(
    base: Instant,
    offset_secs: f64,
    rx: u64,
    tx: u64,
    source: SourceKind,
) -> CounterSnapshot {
    CounterSnapshot::new(
        base + Duration::from_secs_f64(offset_secs),
        Counters {
            rx_bytes: rx,
            tx_bytes: tx,
        },
        source,
    )
}

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}
