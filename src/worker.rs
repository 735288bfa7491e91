// Background metrics publisher: one sampling loop feeding every /ws/metrics client.

use crate::models::MetricsSnapshot;
use crate::service::MetricsService;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::time::{Duration, interval};
use tracing::Instrument;

/// Service, channel and shutdown for the publisher.
pub struct WorkerDeps {
    pub metrics: Arc<MetricsService>,
    pub tx: broadcast::Sender<MetricsSnapshot>,
    pub shutdown_rx: tokio::sync::oneshot::Receiver<()>,
}

pub struct WorkerConfig {
    pub metrics_frequency_ms: u64,
}

/// Spawns the publisher. A tick with no subscribers takes no sample, so
/// counter commands only run while someone is watching. The loop ends when
/// the shutdown sender fires or is dropped.
pub fn spawn(deps: WorkerDeps, config: WorkerConfig) -> tokio::task::JoinHandle<()> {
    let WorkerDeps {
        metrics,
        tx,
        mut shutdown_rx,
    } = deps;

    let worker_span = tracing::span!(
        tracing::Level::DEBUG,
        "worker",
        metrics_frequency_ms = config.metrics_frequency_ms
    );

    tokio::spawn(
        async move {
            let mut tick = interval(Duration::from_millis(config.metrics_frequency_ms));
            tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = tick.tick() => {
                        if tx.receiver_count() == 0 {
                            continue;
                        }
                        let snapshot = metrics.sample_metrics().await;
                        if tx.send(snapshot).is_err() {
                            tracing::debug!(
                                operation = "broadcast_snapshot",
                                "metrics subscribers left before the snapshot was sent"
                            );
                        }
                    }
                    _ = &mut shutdown_rx => {
                        tracing::debug!("Worker shutting down");
                        break;
                    }
                }
            }
        }
        .instrument(worker_span),
    )
}
