// Wire models for the metrics boundary

mod metrics;
mod system;

pub use metrics::{CpuMetrics, MemoryMetrics, MetricsSnapshot, NetworkRate};
pub use system::{HostStats, SystemInfo};
