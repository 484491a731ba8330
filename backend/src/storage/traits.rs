//! # Storage Traits
//!
//! The report service reads everything through `DataStore`, so the hosted
//! database, a local cache, or the in-memory store can back it without the
//! domain layer changing.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use shared::{DailyTotalRow, Dimension, MonthlyCountRow, RawAggregateRow, ReportKind};

/// Source of already-aggregated reporting rows.
///
/// Implementations return rows with camelCase fields; translating the
/// backend's snake_case keys is their job, not the engine's.
#[async_trait]
pub trait DataStore: Send + Sync {
    /// Month-by-dimension rows for a pivoted report
    async fn fetch_aggregate_rows(&self, kind: ReportKind) -> Result<Vec<RawAggregateRow>>;

    /// Active dimensions (categories, genres) that seed the pivot
    async fn fetch_dimensions(&self, kind: ReportKind) -> Result<Vec<Dimension>>;

    /// Month rows for a single-series report
    async fn fetch_monthly_counts(&self, kind: ReportKind) -> Result<Vec<MonthlyCountRow>>;

    /// Per-day expense sums between two dates, inclusive
    async fn fetch_daily_totals(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<DailyTotalRow>>;
}
