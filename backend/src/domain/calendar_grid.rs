//! Calendar grid support for the expense calendar view.
//!
//! A month grid starts on the configured first weekday on or before the 1st
//! and ends on the last weekday of the week holding the month's final day,
//! so leading and trailing days of the neighbouring months are included.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use shared::{DailyTotalRow, MonthKey};
use tracing::debug;

use super::models::ReportError;

/// First and last date shown in the grid for `month`
pub fn calendar_range(month: &MonthKey, week_start: Weekday) -> Result<(NaiveDate, NaiveDate), ReportError> {
    let out_of_range = || ReportError::MonthOutOfRange(month.to_string());

    let first = month.first_day().ok_or_else(out_of_range)?;
    let last = month.last_day().ok_or_else(out_of_range)?;

    let lead = days_into_week(first, week_start);
    let trail = 6 - days_into_week(last, week_start);

    let start = first.checked_sub_days(Days::new(lead)).ok_or_else(out_of_range)?;
    let end = last.checked_add_days(Days::new(trail)).ok_or_else(out_of_range)?;
    Ok((start, end))
}

/// Per-day expense sums between `start` and `end`, inclusive. Rows with
/// dates that do not parse as `YYYY-MM-DD` are dropped.
pub fn daily_totals(rows: &[DailyTotalRow], start: NaiveDate, end: NaiveDate) -> BTreeMap<NaiveDate, f64> {
    rows.iter()
        .filter_map(|row| match NaiveDate::parse_from_str(&row.date_used, "%Y-%m-%d") {
            Ok(date) => Some((date, row.price)),
            Err(_) => {
                debug!("Dropping daily row with unparseable date '{}'", row.date_used);
                None
            }
        })
        .filter(|(date, _)| (start..=end).contains(date))
        .fold(BTreeMap::new(), |mut totals, (date, price)| {
            *totals.entry(date).or_insert(0.0) += price;
            totals
        })
}

/// Sum of the days that belong to `month`, ignoring grid padding days
pub fn month_total(daily: &BTreeMap<NaiveDate, f64>, month: &MonthKey) -> f64 {
    daily
        .iter()
        .filter(|(date, _)| month.contains(**date))
        .map(|(_, price)| price)
        .sum()
}

fn days_into_week(date: NaiveDate, week_start: Weekday) -> u64 {
    let offset = (date.weekday().num_days_from_monday() + 7 - week_start.num_days_from_monday()) % 7;
    u64::from(offset)
}
