//! # Domain Module
//!
//! Contains the report aggregation engine and the service that feeds it.
//!
//! Reporting queries return sparse rows: one row per (month, category) that
//! had activity. Charts need dense series: one point per month with every
//! category present. Everything in between lives here.
//!
//! ## Module Organization
//!
//! - **calendar_window**: the ordered months a report covers
//! - **bucket_index**: grouping raw rows by month key
//! - **category_pivot**: one month's rows as a display-name keyed mapping
//! - **gap_fill**: dense per-month records over a window
//! - **running_total**: month and year-to-date totals from raw rows
//! - **calendar_grid**: calendar grid ranges and per-day expense totals
//! - **year_progress**: elapsed share of the current year
//! - **report_service**: fetches through `DataStore` and assembles responses
//! - **models**: `ReportError` and the `BucketedRow` row strategy
//!
//! ## Rules
//!
//! - Every engine function is pure; the anchor date is always an argument
//! - Unparseable month keys and unknown dimensions are dropped, never errors
//! - A report is either complete for the whole window or an error

pub mod bucket_index;
pub mod calendar_grid;
pub mod calendar_window;
pub mod category_pivot;
pub mod gap_fill;
pub mod models;
pub mod report_service;
pub mod running_total;
pub mod year_progress;

pub use bucket_index::*;
pub use calendar_grid::*;
pub use category_pivot::*;
pub use gap_fill::*;
pub use models::*;
pub use report_service::*;
pub use running_total::*;
pub use year_progress::*;
