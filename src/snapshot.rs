// Compose host readings, CPU usage and network rate into one response

use crate::counters::CounterSnapshot;
use crate::models::{CpuMetrics, HostStats, MemoryMetrics, MetricsSnapshot, NetworkRate};
use crate::rate::NetworkRates;

/// Root path label reported as `disk`.
pub const fn disk_label() -> &'static str {
    if cfg!(target_os = "windows") { "C:\\" } else { "/" }
}

pub fn build_snapshot(
    host: &HostStats,
    cpu_usage_percent: u8,
    rates: NetworkRates,
    counters: &CounterSnapshot,
) -> MetricsSnapshot {
    MetricsSnapshot {
        cpu: CpuMetrics {
            model: host.cpu_model.clone(),
            cores: host.cores,
            usage_percent: cpu_usage_percent.min(100),
            load_avg: host.load_avg,
        },
        memory: MemoryMetrics {
            total_bytes: host.total_memory,
            free_bytes: host.available_memory,
            used_bytes: host.total_memory.saturating_sub(host.available_memory),
        },
        disk: disk_label().to_string(),
        uptime_seconds: host.uptime_secs,
        hostname: host.hostname.clone(),
        network: NetworkRate {
            upload_speed_bytes_per_sec: rate_to_wire(rates.upload_speed),
            download_speed_bytes_per_sec: rate_to_wire(rates.download_speed),
            tx_bytes: counters.tx_bytes,
            rx_bytes: counters.rx_bytes,
            source_kind: counters.source,
        },
    }
}

fn rate_to_wire(bytes_per_sec: f64) -> u64 {
    if bytes_per_sec.is_finite() && bytes_per_sec > 0.0 {
        bytes_per_sec.round() as u64
    } else {
        0
    }
}
