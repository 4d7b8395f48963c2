//! Text formatting helpers for the console GUI.

use chrono::{Local, TimeZone};
use sysinfo::{Pid, ProcessRefreshKind, RefreshKind, System};

/// Formats a count with thousands separators.
///
/// # Examples
/// ```ignore
/// assert_eq!(format_count(1000), "1,000");
/// assert_eq!(format_count(1234567), "1,234,567");
/// ```
pub fn format_count(count: usize) -> String {
    let digits: Vec<char> = count.to_string().chars().collect();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*ch);
    }
    result
}

/// Gets the current process memory usage in megabytes.
///
/// Returns 0.0 if the process information cannot be retrieved.
pub fn get_current_memory_mb() -> f64 {
    let mut sys = System::new_with_specifics(
        RefreshKind::new().with_processes(ProcessRefreshKind::new().with_memory())
    );
    sys.refresh_processes_specifics(ProcessRefreshKind::new().with_memory());

    if let Some(process) = sys.process(Pid::from_u32(std::process::id())) {
        process.memory() as f64 / (1024.0 * 1024.0)
    } else {
        0.0
    }
}

/// Formats memory usage in MB as a human-readable string.
///
/// # Arguments
/// * `memory_mb` - Memory usage in megabytes
pub fn format_memory_mb(memory_mb: f64) -> String {
    if memory_mb > 1024.0 {
        format!("Memory: {:.2} GB", memory_mb / 1024.0)
    } else {
        format!("Memory: {:.1} MB", memory_mb)
    }
}

/// Local wall-clock time of a save timestamp (epoch milliseconds).
pub fn format_saved_at(timestamp_ms: Option<i64>) -> String {
    match timestamp_ms.and_then(|ms| Local.timestamp_millis_opt(ms).single()) {
        Some(time) => format!("Saved {}", time.format("%H:%M:%S")),
        None => "Not saved".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn test_format_memory_mb() {
        assert_eq!(format_memory_mb(512.5), "Memory: 512.5 MB");
        assert_eq!(format_memory_mb(2048.0), "Memory: 2.00 GB");
    }

    #[test]
    fn test_format_saved_at() {
        assert_eq!(format_saved_at(None), "Not saved");
        assert!(format_saved_at(Some(1_700_000_000_000)).starts_with("Saved "));
    }
}
