// Windows counter tiers: raw perf counters via wmic, adapter statistics via PowerShell.
// Parsers are plain functions so they are exercised on every platform.

use super::command::run_command;
use super::{AcquisitionError, CounterSource, Counters, is_excluded_interface};
use async_trait::async_trait;

const WMIC_ARGS: &[&str] = &[
    "path",
    "Win32_PerfRawData_Tcpip_NetworkInterface",
    "get",
    "Name,BytesReceivedPerSec,BytesSentPerSec",
    "/format:csv",
];

const ADAPTER_STATISTICS_SCRIPT: &str = "Get-NetAdapterStatistics | ForEach-Object { '{0},{1},{2}' -f $_.Name, $_.ReceivedBytes, $_.SentBytes }";

/// Primary tier: `Win32_PerfRawData_Tcpip_NetworkInterface` raw (cumulative) byte counters.
#[derive(Debug, Clone, Copy, Default)]
pub struct WmicPerfCounters;

#[async_trait]
impl CounterSource for WmicPerfCounters {
    fn name(&self) -> &'static str {
        "wmic_perf_raw"
    }

    async fn read(&mut self) -> Result<Counters, AcquisitionError> {
        let stdout = run_command("wmic", WMIC_ARGS).await?;
        parse_wmic_csv(&stdout)
    }
}

/// Secondary tier: `Get-NetAdapterStatistics` cumulative received/sent bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdapterStatistics;

#[async_trait]
impl CounterSource for AdapterStatistics {
    fn name(&self) -> &'static str {
        "powershell_adapter_statistics"
    }

    async fn read(&mut self) -> Result<Counters, AcquisitionError> {
        let stdout = run_command(
            "powershell",
            &[
                "-NoProfile",
                "-NonInteractive",
                "-Command",
                ADAPTER_STATISTICS_SCRIPT,
            ],
        )
        .await?;
        parse_adapter_statistics(&stdout)
    }
}

/// Parses `wmic ... /format:csv` output: `Node,BytesReceivedPerSec,BytesSentPerSec,Name`.
pub fn parse_wmic_csv(stdout: &str) -> Result<Counters, AcquisitionError> {
    let mut totals = Counters::default();
    let mut used = 0usize;

    for line in stdout.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let parts: Vec<&str> = line.split(',').collect();
        if parts.len() < 4 {
            continue;
        }
        let (Ok(rx), Ok(tx)) = (
            parts[1].trim().parse::<u64>(),
            parts[2].trim().parse::<u64>(),
        ) else {
            // header row or malformed counter
            continue;
        };
        let name = parts[3..].join(",");
        if name.trim().is_empty() || is_excluded_interface(&name) {
            continue;
        }
        totals.add(rx, tx);
        used += 1;
    }

    if used == 0 {
        return Err(AcquisitionError::Empty);
    }
    Ok(totals)
}

/// Parses `name,received,sent` lines. The name is everything before the last two fields.
pub fn parse_adapter_statistics(stdout: &str) -> Result<Counters, AcquisitionError> {
    let mut totals = Counters::default();
    let mut used = 0usize;

    for line in stdout.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let mut fields = line.rsplitn(3, ',');
        let (Some(sent), Some(received), Some(name)) = (fields.next(), fields.next(), fields.next())
        else {
            continue;
        };
        let (Ok(rx), Ok(tx)) = (received.trim().parse::<u64>(), sent.trim().parse::<u64>()) else {
            continue;
        };
        if name.trim().is_empty() || is_excluded_interface(name) {
            continue;
        }
        totals.add(rx, tx);
        used += 1;
    }

    if used == 0 {
        return Err(AcquisitionError::Empty);
    }
    Ok(totals)
}
