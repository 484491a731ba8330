use std::sync::Arc;

use anyhow::Result;
use backend::config::{config_path_from_env, load_config};
use backend::{InMemoryDataStore, ReportService};
use chrono::{Local, NaiveDate};
use serde_json::json;
use shared::{DailyTotalRow, Dimension, MonthKey, MonthlyCountRow, RawAggregateRow, ReportKind, ReportRequest};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_config(config_path_from_env().as_deref())?;
    let today = Local::now().date_naive();
    let this_month = MonthKey::from_date(today).ok_or_else(|| anyhow::anyhow!("Unsupported date {}", today))?;

    info!("Seeding sample data around {}", this_month);
    let store = sample_store(this_month)?;
    let service = ReportService::new(Arc::new(store), config);

    let request = ReportRequest {
        anchor: Some(today),
        ..Default::default()
    };

    let by_category = service.spending_by_category(request.clone()).await?;
    let books = service.books_read_by_month(request.clone()).await?;
    let totals = service.spending_total_by_month(request).await?;
    let calendar = service.expense_calendar(this_month).await?;
    let progress = service.year_progress(Local::now().naive_local())?;

    let output = json!({
        "spendingByCategory": by_category,
        "booksReadByMonth": books,
        "spendingTotalByMonth": totals,
        "expenseCalendar": calendar,
        "yearProgress": progress,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

/// A few months of expenses and book reviews ending at `this_month`
fn sample_store(this_month: MonthKey) -> Result<InMemoryDataStore> {
    let month = |back: i32| -> Result<String> {
        this_month
            .offset(-back)
            .map(|m| m.to_string())
            .ok_or_else(|| anyhow::anyhow!("Sample month out of range"))
    };

    let categories = vec![
        Dimension::new(1, "Food"),
        Dimension::new(2, "Transport"),
        Dimension::new(3, "Books"),
    ];
    let spending = vec![
        RawAggregateRow::new(month(0)?, 1, 412_000.0),
        RawAggregateRow::new(month(0)?, 2, 65_000.0),
        RawAggregateRow::new(month(1)?, 1, 388_500.0),
        RawAggregateRow::new(month(1)?, 3, 54_000.0),
        RawAggregateRow::new(month(3)?, 2, 71_200.0),
        RawAggregateRow::new(month(5)?, 1, 401_000.0),
    ];
    let monthly_spending: Vec<MonthlyCountRow> = [0, 1, 3, 5]
        .iter()
        .map(|back| -> Result<MonthlyCountRow> {
            let key = month(*back)?;
            let total = spending.iter().filter(|r| r.bucket_key == key).map(|r| r.value).sum();
            Ok(MonthlyCountRow::new(key, total))
        })
        .collect::<Result<_>>()?;
    let books = vec![
        MonthlyCountRow::new(month(0)?, 2.0),
        MonthlyCountRow::new(month(2)?, 1.0),
        MonthlyCountRow::new(month(4)?, 3.0),
    ];

    let first_day = this_month
        .first_day()
        .ok_or_else(|| anyhow::anyhow!("Sample month out of range"))?;
    let daily: Vec<DailyTotalRow> = [(0u64, 12_000.0), (2, 8_500.0), (9, 43_000.0), (15, 6_200.0)]
        .iter()
        .filter_map(|(offset, price)| {
            first_day
                .checked_add_days(chrono::Days::new(*offset))
                .map(|date: NaiveDate| DailyTotalRow::new(date.format("%Y-%m-%d").to_string(), *price))
        })
        .collect();

    InMemoryDataStore::new()
        .with_dimensions(ReportKind::SpendingByCategoryByMonth, &categories)?
        .with_aggregate_rows(ReportKind::SpendingByCategoryByMonth, &spending)?
        .with_monthly_counts(ReportKind::SpendingTotalByMonth, &monthly_spending)?
        .with_monthly_counts(ReportKind::BookCountByMonth, &books)?
        .with_daily_totals(&daily)
}
