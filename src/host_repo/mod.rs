// Host queries via sysinfo: CPU, memory, uptime, hostname, identity

mod linux;

use crate::models::{HostStats, SystemInfo};
use crate::version::{NAME, VERSION};
use std::sync::{Arc, Mutex};
use std::time::Instant;
use sysinfo::System;
use tracing::instrument;

#[derive(Clone)]
pub struct HostRepo {
    sys: Arc<Mutex<System>>,
    last_cpu_refresh: Arc<Mutex<Option<(Instant, f64)>>>,
}

impl Default for HostRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl HostRepo {
    pub fn new() -> Self {
        let mut sys = System::new();
        sys.refresh_memory();
        sys.refresh_cpu_all();
        Self {
            sys: Arc::new(Mutex::new(sys)),
            last_cpu_refresh: Arc::new(Mutex::new(None)),
        }
    }

    #[instrument(skip(self), fields(repo = "host", operation = "get_host_stats"))]
    pub async fn get_host_stats(&self) -> anyhow::Result<HostStats> {
        let sys = self.sys.clone();
        tokio::task::spawn_blocking(move || {
            let mut sys = sys
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo lock poisoned: {}", e))?;
            sys.refresh_memory();

            let load = System::load_average();
            Ok(HostStats {
                cpu_model: cpu_model(&sys),
                cores: sys.cpus().len() as u32,
                load_avg: [load.one, load.five, load.fifteen],
                total_memory: sys.total_memory(),
                available_memory: sys.available_memory(),
                uptime_secs: System::uptime(),
                hostname: System::host_name().unwrap_or_default(),
            })
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }

    /// Global CPU utilization in percent. sysinfo needs two refreshes at least
    /// `MINIMUM_CPU_UPDATE_INTERVAL` apart; calls inside that window return the
    /// cached value and the very first call returns 0.
    #[instrument(skip(self), fields(repo = "host", operation = "get_measured_cpu_usage"))]
    pub async fn get_measured_cpu_usage(&self) -> anyhow::Result<f64> {
        let sys = self.sys.clone();
        let last_cpu_refresh = self.last_cpu_refresh.clone();
        tokio::task::spawn_blocking(move || {
            let mut sys = sys
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo lock poisoned: {}", e))?;
            let mut guard = last_cpu_refresh
                .lock()
                .map_err(|e| anyhow::anyhow!("cpu refresh lock poisoned: {}", e))?;

            let now = Instant::now();
            let previous = *guard;
            let usage = match previous {
                Some((prev_ts, prev_usage))
                    if now.duration_since(prev_ts) < sysinfo::MINIMUM_CPU_UPDATE_INTERVAL =>
                {
                    prev_usage
                }
                Some(_) => {
                    sys.refresh_cpu_all();
                    let usage = sys.global_cpu_usage() as f64;
                    *guard = Some((now, usage));
                    usage
                }
                None => {
                    // baseline only
                    sys.refresh_cpu_all();
                    *guard = Some((now, 0.0));
                    0.0
                }
            };
            Ok(usage.clamp(0.0, 100.0))
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }

    #[instrument(skip(self), fields(repo = "host", operation = "get_system_info"))]
    pub async fn get_system_info(&self) -> anyhow::Result<SystemInfo> {
        tokio::task::spawn_blocking(move || {
            let os_name = System::name()
                .or_else(linux::read_os_pretty_name_linux)
                .unwrap_or_else(|| std::env::consts::OS.into());
            Ok(SystemInfo {
                platform: std::env::consts::OS.into(),
                arch: std::env::consts::ARCH.into(),
                os_name,
                os_version: System::os_version().unwrap_or_default(),
                hostname: System::host_name().unwrap_or_default(),
                app_name: NAME.into(),
                app_version: VERSION.into(),
            })
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }
}

fn cpu_model(sys: &System) -> String {
    linux::read_cpu_model_linux()
        .or_else(|| {
            sys.cpus()
                .first()
                .map(|c| c.brand().trim().to_string())
                .filter(|s| !s.is_empty())
        })
        .unwrap_or_else(|| "Unknown CPU".into())
}
