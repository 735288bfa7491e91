// Linux interface statistics table (/proc/net/dev)

use super::{AcquisitionError, CounterSource, Counters, is_excluded_interface};
use async_trait::async_trait;
use std::path::PathBuf;

pub const PROC_NET_DEV: &str = "/proc/net/dev";

#[derive(Debug, Clone)]
pub struct ProcNetDev {
    path: PathBuf,
}

impl Default for ProcNetDev {
    fn default() -> Self {
        Self::with_path(PROC_NET_DEV)
    }
}

impl ProcNetDev {
    /// Reads a table at a custom location (tests, containers with a bind-mounted /proc).
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CounterSource for ProcNetDev {
    fn name(&self) -> &'static str {
        "proc_net_dev"
    }

    async fn read(&mut self) -> Result<Counters, AcquisitionError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| AcquisitionError::Read {
                path: self.path.display().to_string(),
                source,
            })?;
        parse_proc_net_dev(&content)
    }
}

/// Sums rx bytes (field 1) and tx bytes (field 9) over every non-excluded interface.
///
/// Rows that do not parse are skipped. A table with no parsable rows at all is
/// an error; a table where every row is excluded (loopback only) is a valid zero.
pub fn parse_proc_net_dev(content: &str) -> Result<Counters, AcquisitionError> {
    let mut totals = Counters::default();
    let mut rows = 0usize;

    for line in content.lines().skip(2) {
        let Some((name, fields)) = line.split_once(':') else {
            continue;
        };
        let fields: Vec<&str> = fields.split_whitespace().collect();
        if fields.len() < 9 {
            continue;
        }
        let (Ok(rx), Ok(tx)) = (fields[0].parse::<u64>(), fields[8].parse::<u64>()) else {
            continue;
        };
        rows += 1;
        if is_excluded_interface(name) {
            continue;
        }
        totals.add(rx, tx);
    }

    if rows == 0 {
        return Err(AcquisitionError::Parse(
            "no interface rows in /proc/net/dev".into(),
        ));
    }
    Ok(totals)
}
