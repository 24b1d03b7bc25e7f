//! Input parsing and data source handling.

mod parser;
mod source;

pub use parser::{NULL_TOKENS, Parser, ParserConfig, is_null_token};
pub use source::{SourceMetadata, format_name};
