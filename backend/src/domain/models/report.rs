use shared::{DenseReportRecord, DimensionKey, MonthlyCountRow, RawAggregateRow};

/// Errors raised by the aggregation engine for inputs it cannot turn into a
/// complete report
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReportError {
    #[error("Report window must contain at least one month")]
    EmptyWindow,
    #[error("Window size must be at least 1, got {0}")]
    InvalidWindowSize(u32),
    #[error("Dimension display name '{0}' is used more than once")]
    DuplicateDimensionName(String),
    #[error("Dimension display name '{0}' collides with the month key field")]
    ReservedDimensionName(String),
    #[error("Month out of range for anchor {0}")]
    MonthOutOfRange(String),
}

/// How the aggregator reads a row: which month bucket it belongs to, which
/// dimension (if any) it pivots into, and the value it carries.
pub trait BucketedRow {
    /// Month bucket as stored, expected `YYYY-MM`
    fn bucket_key(&self) -> &str;

    /// Pivot dimension; `None` for single-series rows
    fn dimension_key(&self) -> Option<&DimensionKey>;

    fn value(&self) -> f64;
}

impl BucketedRow for RawAggregateRow {
    fn bucket_key(&self) -> &str {
        &self.bucket_key
    }

    fn dimension_key(&self) -> Option<&DimensionKey> {
        Some(&self.dimension_key)
    }

    fn value(&self) -> f64 {
        self.value
    }
}

impl BucketedRow for MonthlyCountRow {
    fn bucket_key(&self) -> &str {
        &self.year_month
    }

    fn dimension_key(&self) -> Option<&DimensionKey> {
        None
    }

    fn value(&self) -> f64 {
        self.count
    }
}

/// Dense records plus the scalar total of one designated month, produced in
/// a single pass over the rows
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateWithTotal {
    pub records: Vec<DenseReportRecord>,
    pub target_total: f64,
}
