//! Sparse-to-dense reindexing of monthly report rows.
//!
//! Every report chart goes through here: rows are bucketed by month, each
//! window month is pivoted by dimension, and the month key is attached. The
//! output has one record per window month in window order, and every record
//! carries every dimension, so a chart can assume no gaps.
//!
//! The functions are generic over `BucketedRow`, which is how category rows,
//! monthly count rows and any other row shape supply their bucket key,
//! dimension and value.

use std::collections::BTreeMap;

use shared::{DenseReportRecord, Dimension, MonthKey, SeriesPoint};
use tracing::debug;

use super::bucket_index::{group_by_month, MonthBuckets};
use super::category_pivot::{pivot, validate_dimensions};
use super::models::{AggregateWithTotal, BucketedRow, ReportError};
use super::running_total::extract_total;

/// One dense record per window month, each with every dimension's value
/// (0 when absent).
pub fn aggregate<R: BucketedRow>(
    raw_rows: &[R],
    dimensions: &[Dimension],
    window: &[MonthKey],
) -> Result<Vec<DenseReportRecord>, ReportError> {
    check_inputs(dimensions, window)?;
    let buckets = group_by_month(raw_rows);
    Ok(fill(&buckets, dimensions, window))
}

/// `aggregate` plus the raw total of `target_month`, computed from the same
/// month index
pub fn aggregate_with_total<R: BucketedRow>(
    raw_rows: &[R],
    dimensions: &[Dimension],
    window: &[MonthKey],
    target_month: &MonthKey,
) -> Result<AggregateWithTotal, ReportError> {
    check_inputs(dimensions, window)?;
    let buckets = group_by_month(raw_rows);

    Ok(AggregateWithTotal {
        records: fill(&buckets, dimensions, window),
        target_total: extract_total(&buckets, target_month),
    })
}

/// Single-series variant: one point per window month. If a month has
/// several rows the last one wins, as in the pivot.
pub fn aggregate_series<R: BucketedRow>(rows: &[R], window: &[MonthKey]) -> Result<Vec<SeriesPoint>, ReportError> {
    if window.is_empty() {
        return Err(ReportError::EmptyWindow);
    }
    let buckets = group_by_month(rows);

    let points: Vec<SeriesPoint> = window
        .iter()
        .map(|month| SeriesPoint {
            month_key: *month,
            value: buckets.rows_for(month).last().map(|row| row.value()).unwrap_or(0.0),
        })
        .collect();

    debug!(
        "Filled {} series points from {} rows ({} unparseable)",
        points.len(),
        rows.len(),
        buckets.dropped()
    );
    Ok(points)
}

/// Per-dimension sum across dense records, e.g. the share of each genre over
/// the trailing window. Every dimension appears, 0 when never seen.
pub fn dimension_totals(records: &[DenseReportRecord], dimensions: &[Dimension]) -> BTreeMap<String, f64> {
    dimensions
        .iter()
        .map(|dimension| {
            let total = records
                .iter()
                .filter_map(|record| record.get(&dimension.display_name))
                .sum();
            (dimension.display_name.clone(), total)
        })
        .collect()
}

fn check_inputs(dimensions: &[Dimension], window: &[MonthKey]) -> Result<(), ReportError> {
    if window.is_empty() {
        return Err(ReportError::EmptyWindow);
    }
    validate_dimensions(dimensions)
}

fn fill<R: BucketedRow>(
    buckets: &MonthBuckets<'_, R>,
    dimensions: &[Dimension],
    window: &[MonthKey],
) -> Vec<DenseReportRecord> {
    let records: Vec<DenseReportRecord> = window
        .iter()
        .map(|month| DenseReportRecord {
            month_key: *month,
            values: pivot(buckets.rows_for(month), dimensions),
        })
        .collect();

    debug!(
        "Filled {} months x {} dimensions ({} rows dropped for bad bucket keys)",
        records.len(),
        dimensions.len(),
        buckets.dropped()
    );
    records
}
