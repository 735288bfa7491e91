// Publisher tests: one sampling loop, idle without subscribers, clean shutdown

mod common;

use common::{FailingSource, ScriptedSource, chain};
use hostmetrics::counters::{CounterSource, SourceKind};
use hostmetrics::cpu_usage::CpuUsageStrategy;
use hostmetrics::host_repo::HostRepo;
use hostmetrics::models::MetricsSnapshot;
use hostmetrics::rate::RateEstimator;
use hostmetrics::service::MetricsService;
use hostmetrics::worker::{WorkerConfig, WorkerDeps, spawn};
use std::sync::Arc;
use std::sync::atomic::Ordering;
use tokio::sync::broadcast;
use tokio::time::{Duration, timeout};

fn service(tiers: Vec<Box<dyn CounterSource>>) -> Arc<MetricsService> {
    Arc::new(MetricsService::with_parts(
        HostRepo::new(),
        chain(tiers),
        RateEstimator::new(),
        CpuUsageStrategy::LoadAverage,
    ))
}

#[tokio::test]
async fn worker_idles_without_subscribers() {
    let source = FailingSource::default();
    let calls = source.calls.clone();
    let (tx, rx) = broadcast::channel::<MetricsSnapshot>(4);
    drop(rx);
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    let handle = spawn(
        WorkerDeps {
            metrics: service(vec![Box::new(source)]),
            tx,
            shutdown_rx,
        },
        WorkerConfig {
            metrics_frequency_ms: 20,
        },
    );
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let _ = shutdown_tx.send(());
    handle.await.unwrap();
}

#[tokio::test]
async fn worker_publishes_one_sample_per_tick_to_all_subscribers() {
    let (tx, _) = broadcast::channel::<MetricsSnapshot>(16);
    let mut a = tx.subscribe();
    let mut b = tx.subscribe();
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    let handle = spawn(
        WorkerDeps {
            metrics: service(vec![Box::new(ScriptedSource::new(&[
                (1_000, 100),
                (2_000, 200),
                (3_000, 300),
            ]))]),
            tx,
            shutdown_rx,
        },
        WorkerConfig {
            metrics_frequency_ms: 20,
        },
    );

    let first_a = timeout(Duration::from_secs(3), a.recv()).await.unwrap().unwrap();
    let first_b = timeout(Duration::from_secs(3), b.recv()).await.unwrap().unwrap();
    assert_eq!(first_a, first_b);
    assert_eq!(first_a.network.rx_bytes, 1_000);
    assert_eq!(first_a.network.source_kind, SourceKind::Real);

    let second = timeout(Duration::from_secs(3), a.recv()).await.unwrap().unwrap();
    assert_eq!(second.network.rx_bytes, 2_000);

    let _ = shutdown_tx.send(());
    handle.await.unwrap();
}

#[tokio::test]
async fn worker_stops_when_shutdown_sender_dropped() {
    let (tx, _rx) = broadcast::channel::<MetricsSnapshot>(4);
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    let handle = spawn(
        WorkerDeps {
            metrics: service(vec![]),
            tx,
            shutdown_rx,
        },
        WorkerConfig {
            metrics_frequency_ms: 20,
        },
    );
    drop(shutdown_tx);
    timeout(Duration::from_secs(3), handle)
        .await
        .expect("worker did not stop")
        .unwrap();
}
