//! Calendar window generation for monthly reports.
//!
//! A report window is the ordered list of months a chart shows: the
//! `window_size` months ending at the anchor's month, oldest first,
//! optionally followed by the month after the anchor. The anchor is always
//! passed in; nothing here reads the clock.

use chrono::NaiveDate;
use shared::{MonthKey, ReportConfig};

use super::models::ReportError;

/// Months covering a trailing window ending at `anchor`'s month, ascending.
///
/// With `include_next_month` the month after the anchor is appended, so the
/// window holds `window_size + 1` months.
pub fn months(
    anchor: NaiveDate,
    window_size: u32,
    include_next_month: bool,
) -> Result<Vec<MonthKey>, ReportError> {
    if window_size == 0 {
        return Err(ReportError::InvalidWindowSize(window_size));
    }

    let anchor_month = MonthKey::from_date(anchor)
        .ok_or_else(|| ReportError::MonthOutOfRange(anchor.to_string()))?;

    let oldest = 1 - i64::from(window_size);
    let newest = if include_next_month { 1 } else { 0 };

    (oldest..=newest)
        .map(|shift| {
            i32::try_from(shift)
                .ok()
                .and_then(|shift| anchor_month.offset(shift))
                .ok_or_else(|| ReportError::MonthOutOfRange(anchor.to_string()))
        })
        .collect()
}

/// Window for `anchor` using the configured size and next-month flag
pub fn months_for_config(anchor: NaiveDate, config: &ReportConfig) -> Result<Vec<MonthKey>, ReportError> {
    months(anchor, config.window_size, config.include_next_month)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn rendered(window: &[MonthKey]) -> Vec<String> {
        window.iter().map(|m| m.to_string()).collect()
    }

    #[test]
    fn test_trailing_window_without_next_month() {
        let window = months(date(2024, 3, 15), 3, false).unwrap();
        assert_eq!(rendered(&window), vec!["2024-01", "2024-02", "2024-03"]);
    }

    #[test]
    fn test_trailing_window_with_next_month() {
        let window = months(date(2024, 3, 15), 3, true).unwrap();
        assert_eq!(rendered(&window), vec!["2024-01", "2024-02", "2024-03", "2024-04"]);
    }

    #[test]
    fn test_window_crosses_year_boundary() {
        let window = months(date(2024, 1, 31), 3, true).unwrap();
        assert_eq!(rendered(&window), vec!["2023-11", "2023-12", "2024-01", "2024-02"]);

        let window = months(date(2023, 12, 1), 1, true).unwrap();
        assert_eq!(rendered(&window), vec!["2023-12", "2024-01"]);
    }

    #[test]
    fn test_default_config_window_has_thirteen_months() {
        let window = months_for_config(date(2025, 6, 13), &ReportConfig::default()).unwrap();

        assert_eq!(window.len(), 13);
        assert_eq!(window.first().unwrap().to_string(), "2024-07");
        assert_eq!(window.last().unwrap().to_string(), "2025-07");
        assert!(window.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_zero_window_size_is_rejected() {
        assert_eq!(
            months(date(2024, 3, 15), 0, true),
            Err(ReportError::InvalidWindowSize(0))
        );
    }

    #[test]
    fn test_window_past_last_representable_month() {
        let result = months(date(9999, 12, 1), 2, true);
        assert!(matches!(result, Err(ReportError::MonthOutOfRange(_))));
    }

    #[test]
    fn test_anchor_day_does_not_matter() {
        let first = months(date(2024, 5, 1), 4, true).unwrap();
        let last = months(date(2024, 5, 31), 4, true).unwrap();
        assert_eq!(first, last);
    }
}
