//! Number formatting utilities for the dashboard's display fields.
//!
//! Handles f64 values with en-US thousands separators. Absent or NaN inputs
//! degrade to [`PLACEHOLDER`] instead of failing.

/// Shown in place of any value that is absent or not a number.
pub const PLACEHOLDER: &str = "--";

const MAGNITUDES: [(f64, &str); 3] = [(1e12, "T"), (1e9, "B"), (1e6, "M")];

/// Adds thousands separators to the integer part of an already-formatted number.
pub fn group_thousands(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(fraction) => format!("{}{}.{}", sign, grouped, fraction),
        None => format!("{}{}", sign, grouped),
    }
}

/// Trims trailing zeros, adds thousands separators.
pub fn display_formatted_string(formatted: String) -> String {
    let trimmed = if formatted.contains('.') {
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    } else {
        formatted
    };
    group_thousands(&trimmed)
}

/// Format an f64 with at most `decimals` fraction digits, trailing zeros trimmed.
pub fn display_with_decimals(amount: &f64, decimals: usize) -> String {
    let formatted = format!("{:.1$}", amount, decimals);
    display_formatted_string(formatted)
}

fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| !v.is_nan())
}

/// `1234.5` → `1,234.50`.
pub fn format_price(value: impl Into<Option<f64>>) -> String {
    match present(value.into()) {
        Some(v) => group_thousands(&format!("{:.2}", v)),
        None => PLACEHOLDER.to_string(),
    }
}

/// `3.1` → `+3.10%`, `-3.1` → `-3.10%`.
pub fn format_percentage(value: impl Into<Option<f64>>) -> String {
    match present(value.into()) {
        // abs() folds -0.0 into the positive branch's "0.00"
        Some(v) if v >= 0.0 => format!("+{:.2}%", v.abs()),
        Some(v) => format!("{:.2}%", v),
        None => PLACEHOLDER.to_string(),
    }
}

/// Abbreviates with the largest applicable T/B/M suffix; smaller values are
/// grouped in full (`999` → `$999`, `2.5e9` → `$2.50B`).
pub fn format_large_number(value: impl Into<Option<f64>>) -> String {
    let Some(v) = present(value.into()) else {
        return PLACEHOLDER.to_string();
    };

    for (threshold, suffix) in MAGNITUDES {
        if v >= threshold {
            return format!("${:.2}{}", v / threshold, suffix);
        }
    }
    format!("${}", display_with_decimals(&v, 3))
}

/// Chart y-axis tick label.
pub fn format_axis_price(value: f64) -> String {
    format!("${}", display_with_decimals(&value, 3))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("0"), "0");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1000"), "1,000");
        assert_eq!(group_thousands("1234567.891"), "1,234,567.891");
        assert_eq!(group_thousands("-123"), "-123");
        assert_eq!(group_thousands("-123456.00"), "-123,456.00");
    }

    #[test]
    fn test_display_formatted_string_trailing_zeros_trimmed() {
        assert_eq!(display_formatted_string("1.00".to_string()), "1");
        assert_eq!(display_formatted_string("1.50".to_string()), "1.5");
        assert_eq!(display_formatted_string("1000.00".to_string()), "1,000");
        assert_eq!(display_formatted_string("1000".to_string()), "1,000");
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(1234.5), "1,234.50");
        assert_eq!(format_price(67_123.456), "67,123.46");
        assert_eq!(format_price(0.5), "0.50");
        assert_eq!(format_price(-1234.5), "-1,234.50");
    }

    #[test]
    fn test_format_price_placeholder() {
        assert_eq!(format_price(f64::NAN), "--");
        assert_eq!(format_price(None), "--");
    }

    #[test]
    fn test_format_percentage_sign() {
        assert_eq!(format_percentage(3.1), "+3.10%");
        assert_eq!(format_percentage(-3.1), "-3.10%");
        assert_eq!(format_percentage(0.0), "+0.00%");
        assert_eq!(format_percentage(-0.0), "+0.00%");
    }

    #[test]
    fn test_format_percentage_placeholder() {
        assert_eq!(format_percentage(f64::NAN), "--");
        assert_eq!(format_percentage(None), "--");
    }

    #[test]
    fn test_format_large_number_suffixes() {
        assert_eq!(format_large_number(2.5e9), "$2.50B");
        assert_eq!(format_large_number(1.3e12), "$1.30T");
        assert_eq!(format_large_number(4_560_000.0), "$4.56M");
        assert_eq!(format_large_number(1e6), "$1.00M");
    }

    #[test]
    fn test_format_large_number_below_million_grouped() {
        assert_eq!(format_large_number(999.0), "$999");
        assert_eq!(format_large_number(999_999.0), "$999,999");
        assert_eq!(format_large_number(1234.5678), "$1,234.568");
    }

    #[test]
    fn test_format_large_number_placeholder() {
        assert_eq!(format_large_number(f64::NAN), "--");
        assert_eq!(format_large_number(None), "--");
    }

    #[test]
    fn test_chart_labels() {
        assert_eq!(format_axis_price(65000.0), "$65,000");
        assert_eq!(format_axis_price(4512.25), "$4,512.25");
    }
}
