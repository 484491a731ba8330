//! Scalar totals taken from the raw rows alongside the per-dimension
//! breakdown, so a "this month" or "this year" figure needs no extra query.

use shared::MonthKey;

use super::bucket_index::MonthBuckets;
use super::models::BucketedRow;

/// Sum of every row in `target_month`, regardless of dimension. Rows are
/// summed before pivoting, so duplicates and unknown dimensions still count.
pub fn extract_total<R: BucketedRow>(buckets: &MonthBuckets<'_, R>, target_month: &MonthKey) -> f64 {
    buckets
        .rows_for(target_month)
        .iter()
        .map(|row| row.value())
        .sum()
}

/// Year-to-date sum over rows from January of `through`'s year up to and
/// including `through`. Later months of the same year are not counted.
pub fn extract_year_total<R: BucketedRow>(rows: &[R], through: &MonthKey) -> f64 {
    rows.iter()
        .filter(|row| {
            MonthKey::parse(row.bucket_key())
                .is_some_and(|month| month.year() == through.year() && month <= *through)
        })
        .map(|row| row.value())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bucket_index::group_by_month;
    use shared::{MonthlyCountRow, RawAggregateRow};

    fn month(s: &str) -> MonthKey {
        s.parse().unwrap()
    }

    #[test]
    fn test_extract_total_sums_target_month() {
        let rows = vec![
            RawAggregateRow::new("2024-01", 1, 40.0),
            RawAggregateRow::new("2024-02", 1, 100.0),
            RawAggregateRow::new("2024-02", 2, 250.0),
        ];
        let buckets = group_by_month(&rows);

        assert_eq!(extract_total(&buckets, &month("2024-02")), 350.0);
        assert_eq!(extract_total(&buckets, &month("2024-01")), 40.0);
    }

    #[test]
    fn test_extract_total_missing_month_is_zero() {
        let rows = vec![RawAggregateRow::new("2024-01", 1, 40.0)];
        let buckets = group_by_month(&rows);

        assert_eq!(extract_total(&buckets, &month("2024-05")), 0.0);
    }

    #[test]
    fn test_extract_total_counts_unknown_dimensions() {
        let rows = vec![
            RawAggregateRow::new("2024-02", 99, 10.0),
            RawAggregateRow::new("2024-02", 1, 5.0),
            RawAggregateRow::new("2024-02", 1, 5.0),
        ];
        let buckets = group_by_month(&rows);

        assert_eq!(extract_total(&buckets, &month("2024-02")), 20.0);
    }

    #[test]
    fn test_extract_year_total() {
        let rows = vec![
            MonthlyCountRow::new("2023-12", 4.0),
            MonthlyCountRow::new("2024-01", 2.0),
            MonthlyCountRow::new("2024-06", 3.0),
            MonthlyCountRow::new("2024-6", 100.0),
        ];

        assert_eq!(extract_year_total(&rows, &month("2024-12")), 5.0);
        assert_eq!(extract_year_total(&rows, &month("2023-12")), 4.0);
        assert_eq!(extract_year_total(&rows, &month("2022-12")), 0.0);
    }

    #[test]
    fn test_extract_year_total_stops_at_through_month() {
        let rows = vec![
            MonthlyCountRow::new("2024-01", 2.0),
            MonthlyCountRow::new("2024-02", 3.0),
            MonthlyCountRow::new("2024-03", 7.0),
            MonthlyCountRow::new("2024-11", 40.0),
        ];

        assert_eq!(extract_year_total(&rows, &month("2024-01")), 2.0);
        assert_eq!(extract_year_total(&rows, &month("2024-02")), 5.0);
        assert_eq!(extract_year_total(&rows, &month("2024-11")), 52.0);
    }
}
