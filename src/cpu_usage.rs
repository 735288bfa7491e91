// CPU usage strategies: load-average derived, degraded random walk, measured

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

const WALK_MIN: f64 = 5.0;
const WALK_MAX: f64 = 95.0;
const WALK_STEP: f64 = 5.0;

/// Config selector for [`CpuUsageStrategy`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CpuUsageMode {
    /// Random walk on Windows (no meaningful load average), load average elsewhere.
    #[default]
    Auto,
    LoadAverage,
    RandomWalk,
    Measured,
}

#[derive(Debug)]
pub enum CpuUsageStrategy {
    /// `min(100, floor(load1 / cores * 100))`.
    LoadAverage,
    /// Degraded mode: a bounded walk that only keeps the gauge from looking flat.
    RandomWalk(RandomWalk),
    /// Real utilization sampled by sysinfo.
    Measured,
}

impl CpuUsageStrategy {
    pub fn from_mode(mode: CpuUsageMode) -> Self {
        match mode {
            CpuUsageMode::Auto if cfg!(target_os = "windows") => {
                Self::RandomWalk(RandomWalk::from_os_rng())
            }
            CpuUsageMode::Auto | CpuUsageMode::LoadAverage => Self::LoadAverage,
            CpuUsageMode::RandomWalk => Self::RandomWalk(RandomWalk::from_os_rng()),
            CpuUsageMode::Measured => Self::Measured,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::LoadAverage => "load_average",
            Self::RandomWalk(_) => "random_walk",
            Self::Measured => "measured",
        }
    }
}

/// Usage percent from the 1-minute load average, always within `[0, 100]`.
pub fn usage_from_load_average(load_1min: f64, cores: usize) -> u8 {
    if cores == 0 || load_1min.is_nan() {
        return 0;
    }
    ((load_1min / cores as f64) * 100.0).floor().clamp(0.0, 100.0) as u8
}

/// Clamps a measured percentage into `[0, 100]` and rounds it.
pub fn usage_from_measured(percent: f64) -> u8 {
    if percent.is_nan() {
        return 0;
    }
    percent.round().clamp(0.0, 100.0) as u8
}

#[derive(Debug)]
pub struct RandomWalk {
    rng: StdRng,
    last: Option<f64>,
}

impl RandomWalk {
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            last: None,
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            last: None,
        }
    }

    pub fn next_usage(&mut self) -> u8 {
        let previous = match self.last {
            Some(v) => v,
            None => self.rng.random_range(20.0..50.0),
        };
        let step = self.rng.random_range(-WALK_STEP..WALK_STEP);
        let value = (previous + step).clamp(WALK_MIN, WALK_MAX);
        self.last = Some(value);
        value.round() as u8
    }
}
