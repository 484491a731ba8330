//! # Storage Module
//!
//! - **traits**: the `DataStore` contract the report service depends on
//! - **memory**: an in-memory `DataStore` holding backend-shaped rows
//! - **key_case**: snake_case / camelCase key translation for backend rows

pub mod key_case;
pub mod memory;
pub mod traits;

pub use memory::{Dataset, InMemoryDataStore};
pub use traits::DataStore;
