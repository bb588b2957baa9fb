//! SAS Transport (XPT) file decoder.
//!
//! This crate decodes SAS Transport V5 files into an in-memory dataset of
//! typed variables and rows.
//!
//! An XPT file is a flat run of 80-byte physical records. Header markers
//! split it into sections; NAMESTR descriptors and observation rows are
//! logical records that straddle physical record boundaries and have to be
//! reassembled. Numeric values are IBM hexadecimal floats.
//!
//! # Features
//!
//! - Section classification as an explicit state machine
//! - NAMESTR (140 and 136 byte) and observation row reassembly
//! - IBM → IEEE floating-point conversion
//! - Library and member metadata, including SAS datetimes
//! - Partial results on failure
//! - Optional Polars DataFrame export (with `polars` feature)
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use xpt_decode::{DataCell, read_xpt};
//!
//! let dataset = read_xpt(Path::new("dm.xpt")).unwrap();
//! println!("{} ({} rows)", dataset.member.name, dataset.num_rows());
//!
//! if let Some(age) = dataset.variable("AGE") {
//!     let ages: Vec<f64> = age.cells.iter().filter_map(DataCell::as_f64).collect();
//!     println!("{ages:?}");
//! }
//! ```
//!
//! # Partial results
//!
//! ```no_run
//! use std::fs::File;
//! use xpt_decode::XptReader;
//!
//! let file = File::open("broken.xpt").unwrap();
//! match XptReader::new(file).read_dataset() {
//!     Ok(dataset) => println!("{} rows", dataset.num_rows()),
//!     Err(partial) => {
//!         eprintln!("error: {}", partial.error);
//!         eprintln!("decoded {} variables first", partial.dataset.num_variables());
//!     }
//! }
//! ```

pub mod assembler;
mod decoder;
mod error;
pub mod float;
pub mod header;
pub mod record;
pub mod section;
mod types;

#[cfg(feature = "polars")]
mod polars_ext;

// Re-export error types
pub use error::{PartialDecode, Result, XptError};

// Re-export core types
pub use types::{
    DataCell, Dataset, DecodeOptions, LibraryMetadata, MemberMetadata, Variable, VariableType,
};

// Re-export decoding entry points
pub use decoder::{Flow, XptDecoder, XptReader, read_xpt, read_xpt_with_options};

// Re-export Polars integration
#[cfg(feature = "polars")]
pub use polars_ext::dataset_to_dataframe;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
