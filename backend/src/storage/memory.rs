//! # In-Memory Data Store
//!
//! Holds reporting rows exactly as the hosted backend returns them
//! (snake_case JSON objects) and serves them through `DataStore`, running
//! each row through the key casing adapter before typed deserialization.
//! Used by the demo binary and the service tests.

use std::collections::HashMap;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use shared::{DailyTotalRow, Dimension, MonthlyCountRow, RawAggregateRow, ReportKind};
use tracing::{debug, info};

use super::key_case::{camelize_keys, snakeize_keys};
use super::traits::DataStore;

/// Which table a batch of backend rows belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    AggregateRows(ReportKind),
    Dimensions(ReportKind),
    MonthlyCounts(ReportKind),
    DailyTotals,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryDataStore {
    tables: HashMap<Dataset, Vec<Value>>,
}

impl InMemoryDataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append backend-shaped (snake_case) rows to a dataset
    pub fn with_backend_rows(mut self, dataset: Dataset, rows: Vec<Value>) -> Self {
        self.tables.entry(dataset).or_default().extend(rows);
        self
    }

    pub fn with_aggregate_rows(self, kind: ReportKind, rows: &[RawAggregateRow]) -> Result<Self> {
        Ok(self.with_backend_rows(Dataset::AggregateRows(kind), to_backend_rows(rows)?))
    }

    pub fn with_dimensions(self, kind: ReportKind, dimensions: &[Dimension]) -> Result<Self> {
        Ok(self.with_backend_rows(Dataset::Dimensions(kind), to_backend_rows(dimensions)?))
    }

    pub fn with_monthly_counts(self, kind: ReportKind, rows: &[MonthlyCountRow]) -> Result<Self> {
        Ok(self.with_backend_rows(Dataset::MonthlyCounts(kind), to_backend_rows(rows)?))
    }

    pub fn with_daily_totals(self, rows: &[DailyTotalRow]) -> Result<Self> {
        Ok(self.with_backend_rows(Dataset::DailyTotals, to_backend_rows(rows)?))
    }

    fn read<T: DeserializeOwned>(&self, dataset: Dataset) -> Result<Vec<T>> {
        let rows = self.tables.get(&dataset).map(Vec::as_slice).unwrap_or(&[]);
        debug!("Reading {} rows from {:?}", rows.len(), dataset);

        rows.iter()
            .enumerate()
            .map(|(index, row)| {
                serde_json::from_value(camelize_keys(row.clone()))
                    .with_context(|| format!("Malformed row {} in {:?}", index, dataset))
            })
            .collect()
    }
}

fn to_backend_rows<T: Serialize>(rows: &[T]) -> Result<Vec<Value>> {
    rows.iter()
        .map(|row| {
            serde_json::to_value(row)
                .map(snakeize_keys)
                .context("Failed to serialize row")
        })
        .collect()
}

#[async_trait]
impl DataStore for InMemoryDataStore {
    async fn fetch_aggregate_rows(&self, kind: ReportKind) -> Result<Vec<RawAggregateRow>> {
        let rows = self.read(Dataset::AggregateRows(kind))?;
        info!("Fetched {} aggregate rows for {}", rows.len(), kind);
        Ok(rows)
    }

    async fn fetch_dimensions(&self, kind: ReportKind) -> Result<Vec<Dimension>> {
        let dimensions = self.read(Dataset::Dimensions(kind))?;
        info!("Fetched {} dimensions for {}", dimensions.len(), kind);
        Ok(dimensions)
    }

    async fn fetch_monthly_counts(&self, kind: ReportKind) -> Result<Vec<MonthlyCountRow>> {
        let rows = self.read(Dataset::MonthlyCounts(kind))?;
        info!("Fetched {} monthly rows for {}", rows.len(), kind);
        Ok(rows)
    }

    async fn fetch_daily_totals(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<DailyTotalRow>> {
        let rows: Vec<DailyTotalRow> = self.read(Dataset::DailyTotals)?;

        // Mirrors the backend's BETWEEN filter; rows with bad dates are left
        // for the engine to drop
        let rows: Vec<DailyTotalRow> = rows
            .into_iter()
            .filter(|row| match NaiveDate::parse_from_str(&row.date_used, "%Y-%m-%d") {
                Ok(date) => date >= start && date <= end,
                Err(_) => true,
            })
            .collect();

        info!("Fetched {} daily rows between {} and {}", rows.len(), start, end);
        Ok(rows)
    }
}
