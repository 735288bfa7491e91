// Interface totals via sysinfo

use super::{AcquisitionError, CounterSource, Counters, is_excluded_interface};
use async_trait::async_trait;
use std::sync::{Arc, Mutex, TryLockError};
use sysinfo::Networks;

#[derive(Debug, Clone)]
pub struct SysinfoNetworks {
    networks: Arc<Mutex<Networks>>,
}

impl Default for SysinfoNetworks {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoNetworks {
    pub fn new() -> Self {
        Self {
            networks: Arc::new(Mutex::new(Networks::new_with_refreshed_list())),
        }
    }
}

#[async_trait]
impl CounterSource for SysinfoNetworks {
    fn name(&self) -> &'static str {
        "sysinfo_networks"
    }

    async fn read(&mut self) -> Result<Counters, AcquisitionError> {
        let networks = self.networks.clone();
        tokio::task::spawn_blocking(move || {
            // A refresh left running by an earlier timed-out read still owns the
            // lock; fail this tier instead of parking another blocking thread.
            let mut guard = networks.try_lock().map_err(|e| match e {
                TryLockError::WouldBlock => {
                    AcquisitionError::Task("networks refresh already in progress".into())
                }
                TryLockError::Poisoned(e) => {
                    AcquisitionError::Task(format!("networks lock poisoned: {}", e))
                }
            })?;
            guard.refresh(true);
            let mut totals = Counters::default();
            for (name, data) in guard.list().iter() {
                if is_excluded_interface(name) {
                    continue;
                }
                totals.add(data.total_received(), data.total_transmitted());
            }
            Ok(totals)
        })
        .await
        .map_err(|e| AcquisitionError::Task(e.to_string()))?
    }
}
