//! Month bucketing of raw report rows.
//!
//! Rows are grouped by their bucket key. Keys that are not canonical
//! `YYYY-MM` never match a window month, so they are dropped here instead
//! of raising an error.

use std::collections::BTreeMap;

use shared::MonthKey;
use tracing::debug;

use super::models::BucketedRow;

/// Rows grouped by month, each group in input order
#[derive(Debug)]
pub struct MonthBuckets<'a, R> {
    groups: BTreeMap<MonthKey, Vec<&'a R>>,
    dropped: usize,
}

impl<'a, R> MonthBuckets<'a, R> {
    /// Rows for `month`; empty when the month had no activity
    pub fn rows_for(&self, month: &MonthKey) -> &[&'a R] {
        self.groups.get(month).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Months that have at least one row, ascending
    pub fn months(&self) -> impl Iterator<Item = &MonthKey> + '_ {
        self.groups.keys()
    }

    /// Number of rows whose bucket key could not be parsed
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Partition rows by month key
pub fn group_by_month<R: BucketedRow>(rows: &[R]) -> MonthBuckets<'_, R> {
    let (groups, dropped) = rows.iter().fold(
        (BTreeMap::<MonthKey, Vec<&R>>::new(), 0usize),
        |(mut groups, dropped), row| match MonthKey::parse(row.bucket_key()) {
            Some(month) => {
                groups.entry(month).or_default().push(row);
                (groups, dropped)
            }
            None => {
                debug!("Dropping row with unparseable bucket key '{}'", row.bucket_key());
                (groups, dropped + 1)
            }
        },
    );

    MonthBuckets { groups, dropped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::RawAggregateRow;

    fn month(s: &str) -> MonthKey {
        s.parse().unwrap()
    }

    #[test]
    fn test_group_by_month() {
        let rows = vec![
            RawAggregateRow::new("2024-01", 1, 10.0),
            RawAggregateRow::new("2024-02", 1, 20.0),
            RawAggregateRow::new("2024-01", 2, 30.0),
        ];

        let buckets = group_by_month(&rows);

        let january: Vec<f64> = buckets.rows_for(&month("2024-01")).iter().map(|r| r.value).collect();
        assert_eq!(january, vec![10.0, 30.0]); // input order preserved
        assert_eq!(buckets.rows_for(&month("2024-02")).len(), 1);
        assert_eq!(buckets.dropped(), 0);
    }

    #[test]
    fn test_missing_month_is_empty() {
        let rows = vec![RawAggregateRow::new("2024-01", 1, 10.0)];
        let buckets = group_by_month(&rows);

        assert!(buckets.rows_for(&month("2023-12")).is_empty());
    }

    #[test]
    fn test_unparseable_keys_are_dropped() {
        let rows = vec![
            RawAggregateRow::new("2024-1", 1, 10.0),
            RawAggregateRow::new("2024-01-05", 1, 10.0),
            RawAggregateRow::new("", 1, 10.0),
            RawAggregateRow::new("2024-01", 1, 5.0),
        ];

        let buckets = group_by_month(&rows);

        assert_eq!(buckets.dropped(), 3);
        assert_eq!(buckets.months().count(), 1);
        assert_eq!(buckets.rows_for(&month("2024-01"))[0].value, 5.0);
    }

    #[test]
    fn test_months_are_ascending() {
        let rows = vec![
            RawAggregateRow::new("2024-03", 1, 1.0),
            RawAggregateRow::new("2023-11", 1, 1.0),
            RawAggregateRow::new("2024-01", 1, 1.0),
        ];

        let buckets = group_by_month(&rows);
        let months: Vec<String> = buckets.months().map(|m| m.to_string()).collect();

        assert_eq!(months, vec!["2023-11", "2024-01", "2024-03"]);
    }

    #[test]
    fn test_empty_input() {
        let rows: Vec<RawAggregateRow> = Vec::new();
        let buckets = group_by_month(&rows);

        assert!(buckets.is_empty());
        assert_eq!(buckets.dropped(), 0);
    }
}
