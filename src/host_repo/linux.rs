// Linux-specific helpers: /proc/cpuinfo, /etc/os-release.

/// CPU model for `cpu.model` in metrics snapshots, from the first "model name"
/// entry of /proc/cpuinfo. sysinfo's brand string is the fallback.
pub(super) fn read_cpu_model_linux() -> Option<String> {
    #[cfg(target_os = "linux")]
    {
        let content = std::fs::read_to_string("/proc/cpuinfo").ok()?;
        content
            .lines()
            .filter(|line| line.starts_with("model name"))
            .find_map(|line| line.split_once(':'))
            .map(|(_, model)| model.trim().to_string())
            .filter(|model| !model.is_empty() && model != "cpu0")
    }
    #[cfg(not(target_os = "linux"))]
    None
}

/// Read distro name from /etc/os-release (Linux), used when sysinfo has no OS name.
pub(super) fn read_os_pretty_name_linux() -> Option<String> {
    #[cfg(target_os = "linux")]
    {
        let content = std::fs::read_to_string("/etc/os-release").ok()?;
        content
            .lines()
            .find_map(|line| line.strip_prefix("PRETTY_NAME="))
            .map(|v| v.trim_matches('"').to_string())
            .filter(|v| !v.is_empty())
    }
    #[cfg(not(target_os = "linux"))]
    None
}
