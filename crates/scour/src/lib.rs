//! Scour: data-quality validation, cleaning and presentation prep for
//! tabular datasets.
//!
//! A dataset flows through three stages:
//!
//! - **Validate**: scan the data read-only and report missing values,
//!   duplicates, z-score outliers, malformed emails and dates, mixed boolean
//!   spellings and unsafe column names.
//! - **Clean**: repair a private copy with explicit strategies, logging every
//!   operation.
//! - **Prepare**: normalize column names, coerce types and suggest a
//!   visualization role for every column.
//!
//! The caller's data is never modified; each stage works on its own copy.
//!
//! # Example
//!
//! ```no_run
//! use scour::Scour;
//!
//! let result = Scour::new().run("sales_data.csv").unwrap();
//!
//! println!("Duplicate rows: {}", result.summary.duplicate_rows);
//! for entry in &result.cleaning_log {
//!     println!("{}", entry);
//! }
//! ```

pub mod cleaning;
pub mod dataset;
pub mod error;
pub mod input;
pub mod output;
pub mod prep;
pub mod report;
pub mod sample;
pub mod stats;
pub mod validation;

mod scour;

pub use crate::scour::{PipelineResult, Scour, ScourConfig};
pub use cleaning::{Cleaner, CleaningPlan, FillStrategy, Keep};
pub use dataset::{DType, Dataset, Value};
pub use error::{Result, ScourError};
pub use input::{Parser, ParserConfig, SourceMetadata};
pub use prep::{ColumnMetadata, ColumnRole, MetadataTable, Preparer, RoleGuide};
pub use validation::{IssueReport, Summary, ValidationConfig, Validator};
