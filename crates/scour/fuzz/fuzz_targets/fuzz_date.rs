//! Fuzz target for date parsing and date coercion.

#![no_main]

use libfuzzer_sys::fuzz_target;
use scour::dataset::parse_datetime;
use scour::{Dataset, Preparer, Validator, Value};

fuzz_target!(|data: &[u8]| {
    if data.len() > 10_000 {
        return;
    }

    if let Ok(text) = std::str::from_utf8(data) {
        let _ = parse_datetime(text);

        let dataset = Dataset::from_columns(vec![(
            "order date",
            vec![Value::from(text), Value::from("2024-01-15"), Value::Null],
        )]);
        let _ = Validator::new(&dataset).validate_all();

        let mut prep = Preparer::new(&dataset);
        prep.normalize_column_names().enforce_data_types();
    }
});
