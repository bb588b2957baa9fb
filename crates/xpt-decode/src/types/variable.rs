//! Variable definitions.

use serde::Serialize;

use super::DataCell;
use crate::header::Namestr;

/// Variable type from the NAMESTR `ntype` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VariableType {
    Numeric,
    Character,
}

impl VariableType {
    /// Type code 1 is numeric; anything else is character.
    #[must_use]
    pub const fn from_type_code(code: u16) -> Self {
        if code == 1 {
            Self::Numeric
        } else {
            Self::Character
        }
    }
}

/// A variable (column) and the cells decoded for it so far.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Variable {
    /// 1-based position in declared order.
    pub ordinal: usize,
    /// Variable number as written in the NAMESTR record.
    pub number: u16,
    pub name: String,
    pub label: String,
    /// Width in bytes within an observation row.
    pub length: usize,
    pub kind: VariableType,
    /// The full descriptor this variable was built from.
    pub namestr: Namestr,
    pub cells: Vec<DataCell>,
}

impl Variable {
    /// Build a variable from its descriptor.
    #[must_use]
    pub fn from_namestr(ordinal: usize, namestr: Namestr) -> Self {
        Self {
            ordinal,
            number: namestr.number,
            name: namestr.name.clone(),
            label: namestr.label.clone(),
            length: usize::from(namestr.length),
            kind: VariableType::from_type_code(namestr.type_code),
            namestr,
            cells: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_numeric(&self) -> bool {
        self.kind == VariableType::Numeric
    }
}
