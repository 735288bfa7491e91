// Shell-out helper for command-backed counter tiers

use super::AcquisitionError;
use std::process::Stdio;
use tokio::process::Command;

/// Runs `program` and returns its stdout. The child is killed if the returned
/// future is dropped, so the chain's tier timeout also ends the process.
pub(super) async fn run_command(program: &str, args: &[&str]) -> Result<String, AcquisitionError> {
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|source| AcquisitionError::Spawn {
            program: program.to_string(),
            source,
        })?;

    if !output.status.success() {
        return Err(AcquisitionError::ExitStatus {
            program: program.to_string(),
            status: output.status,
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
