//! en-US dollar formatting for asking prices

/// Format `amount` as US dollars with comma grouping and two decimals.
///
/// ```
/// assert_eq!(listing_board::currency::format(900_000.0), "$900,000.00");
/// assert_eq!(listing_board::currency::format(-1234.5), "-$1,234.50");
/// ```
pub fn format(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("${amount}");
    }

    // Float to int casts saturate, so huge values stay well-defined
    let cents = (amount.abs() * 100.0).round() as u128;
    let sign = if amount < 0.0 && cents != 0 { "-" } else { "" };
    format!("{sign}${}.{:02}", group_thousands(cents / 100), cents % 100)
}

fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_prices() {
        assert_eq!(format(900_000.0), "$900,000.00");
        assert_eq!(format(500_000.0), "$500,000.00");
        assert_eq!(format(1_000_000.0), "$1,000,000.00");
    }

    #[test]
    fn test_small_and_fractional() {
        assert_eq!(format(0.0), "$0.00");
        assert_eq!(format(7.0), "$7.00");
        assert_eq!(format(999.999), "$1,000.00");
        assert_eq!(format(1234.5), "$1,234.50");
        assert_eq!(format(0.004), "$0.00");
    }

    #[test]
    fn test_negative_and_non_finite() {
        assert_eq!(format(-42.1), "-$42.10");
        assert_eq!(format(-0.001), "$0.00");
        assert_eq!(format(f64::NAN), "$NaN");
        assert_eq!(format(f64::INFINITY), "$inf");
    }

    #[test]
    fn test_grouping_boundaries() {
        assert_eq!(group_thousands(100), "100");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(123_456_789), "123,456,789");
    }
}
