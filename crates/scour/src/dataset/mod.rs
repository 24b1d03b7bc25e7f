//! Tabular data model shared by every component.

mod table;
mod temporal;
mod value;

pub use table::{Column, Dataset, RowSnapshot};
pub use temporal::parse_datetime;
pub use value::{DType, Value, ValueKey};

/// Literal spellings recognised as booleans.
pub const BOOLEAN_LITERALS: &[&str] = &[
    "True", "False", "true", "false", "0", "1", "yes", "no", "Yes", "No",
];

/// Map a recognised boolean literal to its truth value.
pub fn boolean_literal(text: &str) -> Option<bool> {
    match text {
        "True" | "true" | "1" | "yes" | "Yes" => Some(true),
        "False" | "false" | "0" | "no" | "No" => Some(false),
        _ => None,
    }
}
