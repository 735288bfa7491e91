// Counter deltas -> exponentially smoothed bytes/sec

use crate::counters::CounterSnapshot;

/// Weight of the newest interval; `1 - SMOOTHING_ALPHA` is kept from history.
pub const SMOOTHING_ALPHA: f64 = 0.3;

/// Smoothed download/upload rates in bytes per second.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NetworkRates {
    pub download_speed: f64,
    pub upload_speed: f64,
}

/// Smoothed rate state. One instance lives for the whole process, owned by the
/// metrics service. Speeds never go negative.
#[derive(Debug, Clone)]
pub struct RateEstimator {
    alpha: f64,
    download_speed: f64,
    upload_speed: f64,
    last_snapshot: Option<CounterSnapshot>,
}

impl Default for RateEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl RateEstimator {
    pub fn new() -> Self {
        Self::with_alpha(SMOOTHING_ALPHA)
    }

    /// `alpha` outside (0, 1] falls back to [`SMOOTHING_ALPHA`].
    pub fn with_alpha(alpha: f64) -> Self {
        let alpha = if alpha > 0.0 && alpha <= 1.0 {
            alpha
        } else {
            SMOOTHING_ALPHA
        };
        Self {
            alpha,
            download_speed: 0.0,
            upload_speed: 0.0,
            last_snapshot: None,
        }
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn rates(&self) -> NetworkRates {
        NetworkRates {
            download_speed: self.download_speed,
            upload_speed: self.upload_speed,
        }
    }

    pub fn last_snapshot(&self) -> Option<&CounterSnapshot> {
        self.last_snapshot.as_ref()
    }

    /// Folds `current` into the smoothed rates and re-anchors on it.
    ///
    /// The first snapshot only sets the baseline, and so does a switch between
    /// real and synthetic counters. A zero elapsed time skips the rate update.
    /// A counter that went backwards counts as zero bytes for that interval.
    pub fn update(&mut self, current: CounterSnapshot) -> NetworkRates {
        if let Some(last) = self.last_snapshot.replace(current) {
            if last.source != current.source {
                tracing::debug!(
                    operation = "rate_update",
                    from = ?last.source,
                    to = ?current.source,
                    "counter source changed; re-baselining"
                );
                return self.rates();
            }
            let elapsed = current
                .timestamp
                .checked_duration_since(last.timestamp)
                .map(|d| d.as_secs_f64())
                .unwrap_or(0.0);
            if elapsed > 0.0 {
                let rx_delta = current.rx_bytes.saturating_sub(last.rx_bytes);
                let tx_delta = current.tx_bytes.saturating_sub(last.tx_bytes);
                let download_raw = rx_delta as f64 / elapsed;
                let upload_raw = tx_delta as f64 / elapsed;
                self.download_speed = self.smooth(self.download_speed, download_raw);
                self.upload_speed = self.smooth(self.upload_speed, upload_raw);
            } else {
                tracing::debug!(
                    operation = "rate_update",
                    "non-positive elapsed time between counter samples; rates unchanged"
                );
            }
        }
        self.rates()
    }

    fn smooth(&self, previous: f64, sample: f64) -> f64 {
        (previous * (1.0 - self.alpha) + sample * self.alpha).max(0.0)
    }
}
