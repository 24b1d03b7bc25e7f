//! Fuzz target for the delimited-text parser.
//!
//! Whatever parses must also survive a full validation pass.

#![no_main]

use libfuzzer_sys::fuzz_target;
use scour::{Parser, Validator};

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }

    if let Ok(dataset) = Parser::new().parse_bytes(data) {
        for row in dataset.rows() {
            assert_eq!(row.len(), dataset.column_count());
        }
        let _ = Validator::new(&dataset).validate_all();
    }
});
