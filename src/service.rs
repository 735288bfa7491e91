// Metrics request boundary: one serialized sampler owning the rate state

use crate::config::SamplingConfig;
use crate::counters::{CounterChain, platform_chain};
use crate::cpu_usage::{CpuUsageStrategy, usage_from_load_average, usage_from_measured};
use crate::host_repo::HostRepo;
use crate::models::{HostStats, MetricsSnapshot};
use crate::rate::RateEstimator;
use crate::snapshot::build_snapshot;
use tokio::sync::Mutex;
use tokio::time::Duration;
use tracing::instrument;

/// Everything a sample mutates. Only reachable through the service lock.
#[derive(Debug)]
struct SamplerState {
    counters: CounterChain,
    estimator: RateEstimator,
    cpu_usage: CpuUsageStrategy,
}

pub struct MetricsService {
    host_repo: HostRepo,
    state: Mutex<SamplerState>,
}

impl MetricsService {
    /// Service with the platform counter chain and the configured CPU strategy.
    pub fn new(host_repo: HostRepo, config: &SamplingConfig) -> Self {
        let counters = platform_chain(Duration::from_millis(config.command_timeout_ms));
        let cpu_usage = CpuUsageStrategy::from_mode(config.cpu_usage);
        tracing::info!(
            tiers = ?counters.tier_names(),
            smoothing_alpha = config.smoothing_alpha,
            cpu_usage = cpu_usage.label(),
            "metrics sampler ready"
        );
        if matches!(cpu_usage, CpuUsageStrategy::RandomWalk(_)) {
            tracing::warn!("CPU usage is a synthetic random walk, not a measurement");
        }
        Self::with_parts(
            host_repo,
            counters,
            RateEstimator::with_alpha(config.smoothing_alpha),
            cpu_usage,
        )
    }

    pub fn with_parts(
        host_repo: HostRepo,
        counters: CounterChain,
        estimator: RateEstimator,
        cpu_usage: CpuUsageStrategy,
    ) -> Self {
        Self {
            host_repo,
            state: Mutex::new(SamplerState {
                counters,
                estimator,
                cpu_usage,
            }),
        }
    }

    /// Takes one metrics sample. Never fails: counter tiers fall back to
    /// synthetic data and host query errors degrade to empty readings.
    /// Concurrent callers are serialized for the whole sample.
    #[instrument(skip(self), fields(operation = "sample_metrics"))]
    pub async fn sample_metrics(&self) -> MetricsSnapshot {
        let mut state = self.state.lock().await;

        let host = match self.host_repo.get_host_stats().await {
            Ok(h) => h,
            Err(e) => {
                tracing::warn!(error = %e, operation = "get_host_stats", "host stats failed");
                HostStats::unavailable()
            }
        };

        let cpu_usage_percent = match &mut state.cpu_usage {
            CpuUsageStrategy::LoadAverage => {
                usage_from_load_average(host.load_avg[0], host.cores as usize)
            }
            CpuUsageStrategy::RandomWalk(walk) => walk.next_usage(),
            CpuUsageStrategy::Measured => match self.host_repo.get_measured_cpu_usage().await {
                Ok(v) => usage_from_measured(v),
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        operation = "get_measured_cpu_usage",
                        "CPU usage failed"
                    );
                    0
                }
            },
        };

        let counters = state.counters.sample().await;
        let rates = state.estimator.update(counters);

        build_snapshot(&host, cpu_usage_percent, rates, &counters)
    }
}
