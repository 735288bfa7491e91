// Model serialization and snapshot builder tests (JSON camelCase)

use hostmetrics::counters::{CounterSnapshot, Counters, SourceKind};
use hostmetrics::models::*;
use hostmetrics::rate::NetworkRates;
use hostmetrics::snapshot::{build_snapshot, disk_label};
use std::time::Instant;

fn host() -> HostStats {
    HostStats {
        cpu_model: "Test CPU".into(),
        cores: 8,
        load_avg: [1.0, 0.5, 0.25],
        total_memory: 16_000,
        available_memory: 6_000,
        uptime_secs: 3600,
        hostname: "box".into(),
    }
}

fn counters(source: SourceKind) -> CounterSnapshot {
    CounterSnapshot::new(
        Instant::now(),
        Counters {
            rx_bytes: 2000,
            tx_bytes: 1500,
        },
        source,
    )
}

#[test]
fn test_build_snapshot_composes_host_and_network() {
    let rates = NetworkRates {
        download_speed: 299.6,
        upload_speed: 210.4,
    };
    let snap = build_snapshot(&host(), 12, rates, &counters(SourceKind::Real));
    assert_eq!(snap.cpu.model, "Test CPU");
    assert_eq!(snap.cpu.cores, 8);
    assert_eq!(snap.cpu.usage_percent, 12);
    assert_eq!(snap.cpu.load_avg, [1.0, 0.5, 0.25]);
    assert_eq!(snap.memory.used_bytes, 10_000);
    assert_eq!(snap.disk, disk_label());
    assert_eq!(snap.uptime_seconds, 3600);
    assert_eq!(snap.hostname, "box");
    assert_eq!(snap.network.download_speed_bytes_per_sec, 300);
    assert_eq!(snap.network.upload_speed_bytes_per_sec, 210);
    assert_eq!(snap.network.rx_bytes, 2000);
    assert_eq!(snap.network.tx_bytes, 1500);
}

#[test]
fn test_build_snapshot_saturates_used_memory() {
    let mut h = host();
    h.available_memory = h.total_memory + 1;
    let snap = build_snapshot(&h, 0, NetworkRates::default(), &counters(SourceKind::Real));
    assert_eq!(snap.memory.used_bytes, 0);
}

#[test]
fn test_metrics_snapshot_serialization_camel_case() {
    let snap = build_snapshot(
        &host(),
        40,
        NetworkRates::default(),
        &counters(SourceKind::Synthetic),
    );
    let json = serde_json::to_value(&snap).unwrap();
    assert_eq!(json["cpu"]["usagePercent"], 40);
    assert_eq!(json["cpu"]["loadAvg"].as_array().map(|a| a.len()), Some(3));
    assert_eq!(json["memory"]["totalBytes"], 16_000);
    assert_eq!(json["uptimeSeconds"], 3600);
    assert_eq!(json["network"]["uploadSpeedBytesPerSec"], 0);
    assert_eq!(json["network"]["downloadSpeedBytesPerSec"], 0);
    assert_eq!(json["network"]["txBytes"], 1500);
    assert_eq!(json["network"]["rxBytes"], 2000);
    assert_eq!(json["network"]["sourceKind"], "synthetic");

    let back: MetricsSnapshot = serde_json::from_value(json).unwrap();
    assert_eq!(back, snap);
}

#[test]
fn test_system_info_serialization_camel_case() {
    let info = SystemInfo {
        platform: "linux".into(),
        arch: "x86_64".into(),
        os_name: "Debian".into(),
        os_version: "12".into(),
        hostname: "box".into(),
        app_name: "hostmetrics".into(),
        app_version: "0.1.0".into(),
    };
    let json = serde_json::to_string(&info).unwrap();
    assert!(json.contains("\"osName\""));
    assert!(json.contains("\"appVersion\""));
}
