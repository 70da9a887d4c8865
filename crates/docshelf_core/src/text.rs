//! Small text helpers shared by listings and placeholders.

const SIZE_UNITS: &[&str] = &["KB", "MB", "GB"];

/// Format a byte count for display.
///
/// Values under 1024 render as whole bytes; larger values scale through
/// KB/MB/GB with one decimal place.
///
/// # Returns
/// Human-readable size string, e.g. `"10 B"` or `"20.0 KB"`.
pub fn human_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut size = bytes as f64 / 1024.0;
    let mut unit_idx = 0;
    while size >= 1024.0 && unit_idx < SIZE_UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }
    format!("{:.1} {}", size, SIZE_UNITS[unit_idx])
}
