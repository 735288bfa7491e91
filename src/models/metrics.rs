// Per-request metrics snapshot (CPU, memory, uptime, network rate)

use serde::{Deserialize, Serialize};

use crate::counters::SourceKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpuMetrics {
    pub model: String,
    pub cores: u32,
    pub usage_percent: u8,
    pub load_avg: [f64; 3],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryMetrics {
    pub total_bytes: u64,
    pub free_bytes: u64,
    pub used_bytes: u64,
}

/// Smoothed rates plus the cumulative counters of the sample they came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkRate {
    pub upload_speed_bytes_per_sec: u64,
    pub download_speed_bytes_per_sec: u64,
    pub tx_bytes: u64,
    pub rx_bytes: u64,
    /// `synthetic` when every real counter tier failed for this sample.
    pub source_kind: SourceKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub cpu: CpuMetrics,
    pub memory: MemoryMetrics,
    /// Root path label: `C:\` on Windows, `/` elsewhere.
    pub disk: String,
    pub uptime_seconds: u64,
    pub hostname: String,
    pub network: NetworkRate,
}
