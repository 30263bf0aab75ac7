//! Formatting helpers for list cells and summaries.

use chrono::NaiveDate;

/// Money with two decimals, e.g. `1250.00`.
#[must_use]
pub fn money(value: f64) -> String {
    format!("{value:.2}")
}

/// Dates as `dd.mm.yyyy`.
#[must_use]
pub fn short_date(value: NaiveDate) -> String {
    value.format("%d.%m.%Y").to_string()
}

/// Truncate text to `max_chars` characters with an ellipsis.
///
/// ```rust
/// use car_rental::templates::truncate;
///
/// assert_eq!(truncate("Compact city car", 7), "Compac…");
/// assert_eq!(truncate("Van", 10), "Van");
/// ```
#[must_use]
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{kept}…")
}

/// `1 record`, `3 records`.
#[must_use]
pub fn pluralize(count: i64, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money() {
        assert_eq!(money(55.0), "55.00");
        assert_eq!(money(0.125), "0.12");
    }

    #[test]
    fn test_short_date() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(short_date(date), "01.06.2024");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("Ölwechsel und Bremsen", 4), "Ölw…");
        assert_eq!(truncate("", 3), "");
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize(0, "record", "records"), "0 records");
        assert_eq!(pluralize(1, "record", "records"), "1 record");
    }
}
