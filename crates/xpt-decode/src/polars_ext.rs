//! Polars DataFrame export.

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, PolarsResult, Series};

use crate::types::{DataCell, Dataset, VariableType};

/// Convert a decoded dataset into a DataFrame, one column per variable.
///
/// Numeric variables become `f64` columns and character variables become
/// string columns.
///
/// # Errors
///
/// Fails if the dataset is not rectangular.
pub fn dataset_to_dataframe(dataset: &Dataset) -> PolarsResult<DataFrame> {
    let columns: Vec<Column> = dataset
        .variables
        .iter()
        .map(|var| {
            let name = var.name.as_str();
            match var.kind {
                VariableType::Numeric => {
                    let values: Vec<Option<f64>> =
                        var.cells.iter().map(DataCell::as_f64).collect();
                    Series::new(name.into(), values).into_column()
                }
                VariableType::Character => {
                    let values: Vec<Option<&str>> =
                        var.cells.iter().map(DataCell::as_str).collect();
                    Series::new(name.into(), values).into_column()
                }
            }
        })
        .collect();
    DataFrame::new(columns)
}

impl Dataset {
    /// Convert into a Polars DataFrame.
    ///
    /// # Errors
    ///
    /// See [`dataset_to_dataframe`].
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        dataset_to_dataframe(self)
    }
}
