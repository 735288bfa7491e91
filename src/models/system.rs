// Host query results and static system identity

use serde::{Deserialize, Serialize};

/// Synchronous host readings taken once per metrics sample.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HostStats {
    pub cpu_model: String,
    pub cores: u32,
    pub load_avg: [f64; 3],
    pub total_memory: u64,
    /// Memory available to new allocations (reclaimable cache counts as free).
    pub available_memory: u64,
    pub uptime_secs: u64,
    pub hostname: String,
}

impl HostStats {
    /// Placeholder used when the host query itself fails.
    pub fn unavailable() -> Self {
        Self {
            cpu_model: "Unknown CPU".into(),
            ..Self::default()
        }
    }
}

/// Static identity; fetched once at startup and exposed via GET /api/info.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemInfo {
    pub platform: String,
    pub arch: String,
    pub os_name: String,
    pub os_version: String,
    pub hostname: String,
    pub app_name: String,
    pub app_version: String,
}
