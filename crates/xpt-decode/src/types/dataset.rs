//! Dataset and header metadata.

use chrono::NaiveDateTime;
use serde::Serialize;

use super::{DataCell, Variable};
use crate::header::{DescriptorSize, parse_xpt_datetime};

/// File-level metadata from the records after the LIBRARY header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LibraryMetadata {
    /// Leading SAS symbol ("SAS").
    pub symbol: String,
    /// Library tag ("SASLIB").
    pub library: String,
    pub sas_version: String,
    pub os_name: String,
    /// Created datetime as written (`ddMMMyy:hh:mm:ss`).
    pub created: String,
    /// Modified datetime as written.
    pub modified: String,
}

impl LibraryMetadata {
    #[must_use]
    pub fn created_at(&self) -> Option<NaiveDateTime> {
        parse_xpt_datetime(&self.created)
    }

    #[must_use]
    pub fn modified_at(&self) -> Option<NaiveDateTime> {
        parse_xpt_datetime(&self.modified)
    }
}

/// Dataset-level metadata from the records after the DSCRPTR header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MemberMetadata {
    /// Dataset name.
    pub name: String,
    pub sas_version: String,
    pub os_name: String,
    pub created: String,
    pub modified: String,
    /// Dataset label.
    pub label: Option<String>,
    /// Dataset type.
    pub dataset_type: Option<String>,
}

impl MemberMetadata {
    #[must_use]
    pub fn created_at(&self) -> Option<NaiveDateTime> {
        parse_xpt_datetime(&self.created)
    }

    #[must_use]
    pub fn modified_at(&self) -> Option<NaiveDateTime> {
        parse_xpt_datetime(&self.modified)
    }
}

/// A decoded XPT member.
///
/// Each variable owns its column of cells. After a complete pass every
/// variable holds the same number of cells, one per row.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    pub library: LibraryMetadata,
    pub member: MemberMetadata,
    /// Variables in declared order.
    pub variables: Vec<Variable>,
    /// NAMESTR record size, known once the MEMBER header is read.
    pub descriptor_size: Option<DescriptorSize>,
    /// Variable count declared by the NAMESTR header.
    pub declared_variable_count: Option<usize>,
    /// Bytes per observation row (sum of variable lengths), known once the
    /// OBS header is read.
    pub row_width: Option<usize>,
}

impl Dataset {
    /// Number of decoded rows.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.variables.first().map_or(0, |var| var.cells.len())
    }

    /// Number of variables.
    #[must_use]
    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    /// Whether every variable holds the same number of cells.
    #[must_use]
    pub fn is_rectangular(&self) -> bool {
        let rows = self.num_rows();
        self.variables.iter().all(|var| var.cells.len() == rows)
    }

    /// Find a variable by name.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|var| var.name == name)
    }

    /// Cells of one row in variable order.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<Vec<&DataCell>> {
        self.variables
            .iter()
            .map(|var| var.cells.get(index))
            .collect()
    }
}
