//! Report service for the dashboard charts.
//!
//! Fetches rows and dimensions through a `DataStore`, resolves the report
//! window from the request and `ReportConfig`, and hands everything to the
//! aggregation engine. This is the only place the current date is read; the
//! engine itself always receives an explicit anchor.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, NaiveDateTime};
use shared::{
    CategoryReportResponse, ExpenseCalendarResponse, MonthKey, ReportConfig, ReportKind, ReportRequest,
    SeriesReportResponse, YearProgress,
};
use tracing::info;

use super::bucket_index::group_by_month;
use super::calendar_grid::{calendar_range, daily_totals, month_total};
use super::calendar_window;
use super::gap_fill::{aggregate_series, aggregate_with_total, dimension_totals};
use super::models::{AggregateWithTotal, ReportError};
use super::running_total::{extract_total, extract_year_total};
use super::year_progress::year_progress;
use crate::storage::DataStore;

/// Service that builds every monthly report the dashboard shows
pub struct ReportService<S: DataStore> {
    store: Arc<S>,
    config: ReportConfig,
}

impl<S: DataStore> Clone for ReportService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: self.config.clone(),
        }
    }
}

impl<S: DataStore> ReportService<S> {
    pub fn new(store: Arc<S>, config: ReportConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Spending per category per month, gap-filled, with the anchor month's
    /// total and each category's total over the window
    pub async fn spending_by_category(&self, request: ReportRequest) -> Result<CategoryReportResponse> {
        let kind = ReportKind::SpendingByCategoryByMonth;
        let anchor = resolve_anchor(&request);
        let window = self.resolve_window(&request, anchor)?;
        let current_month = month_of(anchor)?;

        info!(
            "Building {} report anchored at {} over {} months",
            kind,
            anchor,
            window.len()
        );

        let (dimensions, rows) = tokio::try_join!(
            self.store.fetch_dimensions(kind),
            self.store.fetch_aggregate_rows(kind),
        )
        .with_context(|| format!("Failed to fetch data for {} report", kind))?;

        let AggregateWithTotal { records, target_total } =
            aggregate_with_total(&rows, &dimensions, &window, &current_month)?;
        let dimension_totals = dimension_totals(&records, &dimensions);
        let year_to_date_total = extract_year_total(&rows, &current_month);

        info!(
            "{} report: {} records x {} categories, {} total {:.2}",
            kind,
            records.len(),
            dimensions.len(),
            current_month,
            target_total
        );

        Ok(CategoryReportResponse {
            kind,
            window,
            dimensions,
            records,
            current_month,
            current_month_total: target_total,
            year_to_date_total,
            dimension_totals,
        })
    }

    /// Books read per month, gap-filled
    pub async fn books_read_by_month(&self, request: ReportRequest) -> Result<SeriesReportResponse> {
        self.series_report(ReportKind::BookCountByMonth, request).await
    }

    /// Total spending per month, gap-filled
    pub async fn spending_total_by_month(&self, request: ReportRequest) -> Result<SeriesReportResponse> {
        self.series_report(ReportKind::SpendingTotalByMonth, request).await
    }

    /// Per-day expense totals covering the calendar grid of `month`
    pub async fn expense_calendar(&self, month: MonthKey) -> Result<ExpenseCalendarResponse> {
        let (range_start, range_end) = calendar_range(&month, self.config.week_starts_on.weekday())?;
        info!("Building expense calendar for {} ({} to {})", month, range_start, range_end);

        let rows = self
            .store
            .fetch_daily_totals(range_start, range_end)
            .await
            .with_context(|| format!("Failed to fetch daily expenses for {}", month))?;

        let daily = daily_totals(&rows, range_start, range_end);
        let month_total = month_total(&daily, &month);

        Ok(ExpenseCalendarResponse {
            month,
            range_start,
            range_end,
            daily_totals: daily,
            month_total,
        })
    }

    pub fn year_progress(&self, now: NaiveDateTime) -> Result<YearProgress> {
        Ok(year_progress(now)?)
    }

    async fn series_report(&self, kind: ReportKind, request: ReportRequest) -> Result<SeriesReportResponse> {
        let anchor = resolve_anchor(&request);
        let window = self.resolve_window(&request, anchor)?;
        let current_month = month_of(anchor)?;

        info!(
            "Building {} report anchored at {} over {} months",
            kind,
            anchor,
            window.len()
        );

        let rows = self
            .store
            .fetch_monthly_counts(kind)
            .await
            .with_context(|| format!("Failed to fetch data for {} report", kind))?;

        let points = aggregate_series(&rows, &window)?;
        let current_month_total = extract_total(&group_by_month(&rows), &current_month);
        let year_to_date_total = extract_year_total(&rows, &current_month);

        Ok(SeriesReportResponse {
            kind,
            window,
            points,
            current_month,
            current_month_total,
            year_to_date_total,
        })
    }

    fn resolve_window(&self, request: &ReportRequest, anchor: NaiveDate) -> Result<Vec<MonthKey>, ReportError> {
        calendar_window::months(
            anchor,
            request.window_size.unwrap_or(self.config.window_size),
            request.include_next_month.unwrap_or(self.config.include_next_month),
        )
    }
}

fn resolve_anchor(request: &ReportRequest) -> NaiveDate {
    request.anchor.unwrap_or_else(|| Local::now().date_naive())
}

fn month_of(anchor: NaiveDate) -> Result<MonthKey, ReportError> {
    MonthKey::from_date(anchor).ok_or_else(|| ReportError::MonthOutOfRange(anchor.to_string()))
}
