//! Core types for decoded XPT data.
//!
//! This module provides the data structures a decode pass produces:
//! variables and their cells, the dataset with its metadata, and the
//! options that steer decoding.

mod dataset;
mod options;
mod value;
mod variable;

pub use dataset::{Dataset, LibraryMetadata, MemberMetadata};
pub use options::DecodeOptions;
pub use value::DataCell;
pub use variable::{Variable, VariableType};
