//! Year progress shown on the dashboard home view: how much of the
//! current calendar year has elapsed.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use shared::YearProgress;

use super::models::ReportError;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Elapsed share of `now`'s calendar year.
///
/// Elapsed days are rounded down and remaining days up, so the two always
/// add up to the length of the year.
pub fn year_progress(now: NaiveDateTime) -> Result<YearProgress, ReportError> {
    let year = now.year();
    let out_of_range = || ReportError::MonthOutOfRange(now.to_string());

    let start = NaiveDate::from_ymd_opt(year, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(out_of_range)?;
    let end = NaiveDate::from_ymd_opt(year + 1, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(out_of_range)?;

    let total = (end - start).num_milliseconds();
    let elapsed = (now - start).num_milliseconds();
    let remaining = total - elapsed;

    let percentage = (elapsed as f64 / total as f64 * 100.0 * 100.0).round() / 100.0;

    Ok(YearProgress {
        year,
        percentage,
        elapsed_days: elapsed.div_euclid(MILLIS_PER_DAY),
        remaining_days: (remaining + MILLIS_PER_DAY - 1).div_euclid(MILLIS_PER_DAY),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_start_of_year() {
        let progress = year_progress(at(2025, 1, 1, 0)).unwrap();

        assert_eq!(progress.year, 2025);
        assert_eq!(progress.percentage, 0.0);
        assert_eq!(progress.elapsed_days, 0);
        assert_eq!(progress.remaining_days, 365);
    }

    #[test]
    fn test_mid_year_in_leap_year() {
        // 2024 has 366 days; midnight starting July 2nd is exactly halfway
        let progress = year_progress(at(2024, 7, 2, 0)).unwrap();

        assert_eq!(progress.percentage, 50.0);
        assert_eq!(progress.elapsed_days, 183);
        assert_eq!(progress.remaining_days, 183);
    }

    #[test]
    fn test_partial_day_rounding() {
        let progress = year_progress(at(2025, 1, 2, 6)).unwrap();

        assert_eq!(progress.elapsed_days, 1);
        assert_eq!(progress.remaining_days, 364);
        assert_eq!(progress.percentage, 0.34);
    }

    #[test]
    fn test_last_day_of_year() {
        let progress = year_progress(at(2025, 12, 31, 23)).unwrap();

        assert_eq!(progress.elapsed_days, 364);
        assert_eq!(progress.remaining_days, 1);
        assert!(progress.percentage > 99.0 && progress.percentage < 100.0);
    }
}
