const UNITS: [&str; 9] = ["Bytes", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];
const K: f64 = 1024.0;

pub const DEFAULT_DECIMALS: usize = 2;

/// Format a byte count for humans, e.g. `1536` -> `"1.50 KB"`.
pub fn format_file_size(bytes: u64, decimals: usize) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    // floor(log_1024(bytes)), in integer steps to stay exact at unit boundaries
    let mut index = 0;
    let mut rest = bytes;
    while rest >= 1024 && index < UNITS.len() - 1 {
        rest /= 1024;
        index += 1;
    }
    let scaled = bytes as f64 / K.powi(index as i32);

    format!("{:.*} {}", decimals, scaled, UNITS[index])
}
