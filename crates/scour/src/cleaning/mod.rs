//! Repairs for the defects the validator finds.

mod cleaner;
mod plan;
mod strategy;

pub use cleaner::{Cleaner, UNKNOWN_MODE};
pub use plan::{CleaningPlan, DEFAULT_TEXT_FILL};
pub use strategy::{FillStrategy, Keep};
