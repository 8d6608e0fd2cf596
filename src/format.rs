const UNITS: [&str; 6] = ["Bytes", "KB", "MB", "GB", "TB", "PB"];

pub const DEFAULT_DECIMALS: usize = 2;

/// Largest number of decimal places the formatters will print.
pub const MAX_DECIMALS: usize = 20;

/// Formats a byte count with the largest base-1024 unit that keeps the value at or above 1.
///
/// The mantissa is rounded to `decimals` places (at most [`MAX_DECIMALS`]) and trailing
/// zeros are dropped.
///
/// # Examples
/// ```
/// use rowcast::format::format_bytes;
/// assert_eq!(format_bytes(0.0, 2), "0 Bytes");
/// assert_eq!(format_bytes(1024.0, 2), "1 KB");
/// assert_eq!(format_bytes(1536.0, 2), "1.5 KB");
/// ```
pub fn format_bytes(bytes: f64, decimals: usize) -> String {
    if !(bytes > 0.0) {
        return format!("0 {}", UNITS[0]);
    }

    let mut index = 0;
    let mut value = bytes;
    while value >= 1024.0 && index < UNITS.len() - 1 {
        value /= 1024.0;
        index += 1;
    }

    format!("{} {}", trim_decimals(value, decimals), UNITS[index])
}

fn trim_decimals(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals.min(MAX_DECIMALS), value);
    if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        fixed
    }
}

/// Formats an integer with `,` thousands separators.
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Formats hours, dropping the fraction when whole.
pub fn format_hours(hours: f64) -> String {
    trim_decimals(hours, DEFAULT_DECIMALS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes_zero() {
        assert_eq!(format_bytes(0.0, 2), "0 Bytes");
    }

    #[test]
    fn test_format_bytes_units() {
        assert_eq!(format_bytes(512.0, 2), "512 Bytes");
        assert_eq!(format_bytes(1024.0, 2), "1 KB");
        assert_eq!(format_bytes(1536.0, 2), "1.5 KB");
        assert_eq!(format_bytes(10_368_000.0, 2), "9.89 MB");
        assert_eq!(format_bytes(1024f64.powi(2), 2), "1 MB");
        assert_eq!(format_bytes(1024f64.powi(4) * 3.0, 2), "3 TB");
    }

    #[test]
    fn test_format_bytes_caps_at_petabytes() {
        assert_eq!(format_bytes(1024f64.powi(6), 2), "1024 PB");
    }

    #[test]
    fn test_format_bytes_fraction_below_one() {
        assert_eq!(format_bytes(0.5, 2), "0.5 Bytes");
    }

    #[test]
    fn test_format_bytes_decimals() {
        assert_eq!(format_bytes(1500.0, 0), "1 KB");
        assert_eq!(format_bytes(1500.0, 3), "1.465 KB");
    }

    #[test]
    fn test_format_bytes_caps_decimals() {
        assert_eq!(format_bytes(1536.0, 70_000), "1.5 KB");
        assert_eq!(format_bytes(1500.0, usize::MAX), format_bytes(1500.0, MAX_DECIMALS));
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(144_000), "144,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn test_format_hours() {
        assert_eq!(format_hours(24.0), "24");
        assert_eq!(format_hours(8.5), "8.5");
    }
}
