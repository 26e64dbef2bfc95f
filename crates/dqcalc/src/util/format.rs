/// Insert thousands separators into a non-negative integer
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut result = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Format a user count, truncating fractional users (e.g. "9,458")
pub fn format_count(value: f64) -> String {
    let whole = value.abs().trunc() as u64;
    if value < 0.0 && whole > 0 {
        format!("-{}", group_thousands(whole))
    } else {
        group_thousands(whole)
    }
}

/// Format a value already on the 0-100 scale (e.g. "9.70%")
pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, value)
}

/// Like [`format_percent`] with a leading "+" on positive values
pub fn format_signed_percent(value: f64, decimals: usize) -> String {
    if value > 0.0 {
        format!("+{:.*}%", decimals, value)
    } else {
        format!("{:.*}%", decimals, value)
    }
}

/// Format a 0-1 ratio as a whole percentage, truncated (e.g. "94%")
pub fn format_ratio(ratio: f64) -> String {
    format!("{}%", (ratio * 100.0) as i64)
}
