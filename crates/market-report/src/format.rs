//! Number and date formatting shared by every output form

use chrono::{DateTime, Datelike, Local, Weekday};

/// Placeholder for absent figures
pub const NOT_AVAILABLE: &str = "N/A";

/// Two decimals with `,` thousands separators, e.g. `42,000.00`
pub fn number(value: f64) -> String {
    let fixed = format!("{value:.2}");
    let (sign, digits) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}{grouped}.{frac_part}")
}

/// Two decimals with a leading `+` on positive values
pub fn signed(value: f64) -> String {
    if value > 0.0 {
        format!("+{value:.2}")
    } else {
        format!("{value:.2}")
    }
}

pub fn signed_pct(value: f64) -> String {
    format!("{}%", signed(value))
}

pub fn opt_signed_pct(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), signed_pct)
}

/// `$` prefixed price
pub fn price(value: f64) -> String {
    format!("${value:.2}")
}

pub fn rsi(value: f64) -> String {
    format!("{value:.1}")
}

/// Colored indicator for a change
pub fn change_emoji(value: f64) -> &'static str {
    if value > 0.0 {
        "🟢"
    } else if value < 0.0 {
        "🔴"
    } else {
        "⚪"
    }
}

/// CSS class for a change
pub fn change_class(value: Option<f64>) -> &'static str {
    match value {
        Some(v) if v > 0.0 => "positive",
        Some(v) if v < 0.0 => "negative",
        _ => "neutral",
    }
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// `2026-10-16 Friday`
pub fn report_date(at: &DateTime<Local>) -> String {
    format!("{} {}", at.format("%Y-%m-%d"), weekday_name(at.weekday()))
}

pub fn clock_time(at: &DateTime<Local>) -> String {
    at.format("%H:%M:%S").to_string()
}

pub fn timestamp(at: &DateTime<Local>) -> String {
    at.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// `YYYYMMDD`, used in export file names
pub fn file_date(at: &DateTime<Local>) -> String {
    at.format("%Y%m%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_number_grouping() {
        assert_eq!(number(0.0), "0.00");
        assert_eq!(number(18.456), "18.46");
        assert_eq!(number(999.999), "1,000.00");
        assert_eq!(number(5842.1), "5,842.10");
        assert_eq!(number(42000.0), "42,000.00");
        assert_eq!(number(1_234_567.891), "1,234,567.89");
        assert_eq!(number(-17500.5), "-17,500.50");
    }

    #[test]
    fn test_signed_values() {
        assert_eq!(signed(1.2), "+1.20");
        assert_eq!(signed(-0.456), "-0.46");
        assert_eq!(signed(0.0), "0.00");
        assert_eq!(signed_pct(0.8), "+0.80%");
        assert_eq!(opt_signed_pct(None), "N/A");
    }

    #[test]
    fn test_price_and_rsi() {
        assert_eq!(price(140.5), "$140.50");
        assert_eq!(rsi(71.04), "71.0");
        assert_eq!(rsi(29.96), "30.0");
    }

    #[test]
    fn test_change_indicators() {
        assert_eq!(change_emoji(0.1), "🟢");
        assert_eq!(change_emoji(-0.1), "🔴");
        assert_eq!(change_emoji(0.0), "⚪");
        assert_eq!(change_class(Some(2.0)), "positive");
        assert_eq!(change_class(Some(-2.0)), "negative");
        assert_eq!(change_class(None), "neutral");
    }

    #[test]
    fn test_dates() {
        let at = Local.with_ymd_and_hms(2026, 10, 16, 9, 5, 7).unwrap();
        assert_eq!(report_date(&at), "2026-10-16 Friday");
        assert_eq!(clock_time(&at), "09:05:07");
        assert_eq!(timestamp(&at), "2026-10-16 09:05:07");
        assert_eq!(file_date(&at), "20261016");
    }
}
