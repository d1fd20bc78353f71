//! Number formatting for reports and log lines.

/// Maximum fraction digits kept by [`group_thousands`].
const MAX_FRACTION_DIGITS: usize = 3;

/// Formats a number with comma thousands separators.
///
/// At most three fraction digits are kept and trailing zeros are dropped,
/// so `2500000.0` becomes `2,500,000` and `1234.5678` becomes `1,234.568`.
///
/// ```
/// use screener_types::group_thousands;
///
/// assert_eq!(group_thousands(2_000_000.0), "2,000,000");
/// assert_eq!(group_thousands(999.5), "999.5");
/// ```
#[must_use]
pub fn group_thousands(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.*}", MAX_FRACTION_DIGITS, value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((&fixed, ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3 + 1);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let is_zero = int_part.bytes().all(|b| b == b'0') && frac_part.is_empty();
    let sign = if value.is_sign_negative() && !is_zero { "-" } else { "" };

    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac_part}")
    }
}

/// Formats a price in dollars with two decimals, e.g. `$150.00`.
#[must_use]
pub fn format_price(value: f64) -> String {
    format!("${value:.2}")
}
