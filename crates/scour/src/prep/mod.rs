//! Presentation preparation: names, types and roles for charting tools.

mod metadata;
mod preparer;
mod roles;

pub use metadata::{ColumnMetadata, METADATA_HEADERS, MetadataTable};
pub use preparer::{NUMERIC_COERCION_RATIO, Preparer, normalize_name};
pub use roles::{ColumnRole, MEASURE_CARDINALITY_RATIO, RoleGuide};
