// Presentation helpers shared by snapshots and the headless driver.

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Human-readable size with at most two decimals ("1.5 KB", "0 Bytes")
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, SIZE_UNITS[unit])
}

/// Minutes below one hour, whole hours above
pub fn format_play_time(hours: f64) -> String {
    if hours < 1.0 {
        format!("{} min", (hours * 60.0).round() as u64)
    } else {
        format!("{} h", hours.round() as u64)
    }
}
