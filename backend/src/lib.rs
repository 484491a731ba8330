//! # Report Backend
//!
//! Turns sparse monthly reporting rows (expenses by category, books read)
//! into dense, gap-filled series ready for charting.
//!
//! - `domain`: the aggregation engine and the report service that drives it
//! - `storage`: the `DataStore` contract the rows are fetched through, an
//!   in-memory implementation, and the key-casing adapter for backend rows
//! - `config`: YAML loading of `ReportConfig`

pub mod config;
pub mod domain;
pub mod storage;

pub use domain::ReportService;
pub use storage::{DataStore, InMemoryDataStore};
