//! Pivot of one month's rows into a display-name keyed mapping.

use std::collections::{BTreeMap, HashSet};

use shared::{Dimension, MONTH_KEY_FIELD};

use super::models::{BucketedRow, ReportError};

/// Map every dimension's display name to its value for the month.
///
/// Dimensions without a matching row are 0. A row overwrites rather than
/// adds, so when several rows share a dimension the last one in input order
/// wins. Rows for unknown dimensions, or rows without a dimension, are
/// ignored. The result always has exactly one entry per dimension.
pub fn pivot<R: BucketedRow>(rows_for_month: &[&R], dimensions: &[Dimension]) -> BTreeMap<String, f64> {
    dimensions
        .iter()
        .map(|dimension| {
            let value = rows_for_month
                .iter()
                .rev()
                .find(|row| row.dimension_key() == Some(&dimension.id))
                .map(|row| row.value())
                .unwrap_or(0.0);
            (dimension.display_name.clone(), value)
        })
        .collect()
}

/// Display names become record field keys, so they must be unique and must
/// not shadow the month key field.
pub fn validate_dimensions(dimensions: &[Dimension]) -> Result<(), ReportError> {
    let mut seen = HashSet::with_capacity(dimensions.len());
    for dimension in dimensions {
        if dimension.display_name == MONTH_KEY_FIELD {
            return Err(ReportError::ReservedDimensionName(dimension.display_name.clone()));
        }
        if !seen.insert(dimension.display_name.as_str()) {
            return Err(ReportError::DuplicateDimensionName(dimension.display_name.clone()));
        }
    }
    Ok(())
}
