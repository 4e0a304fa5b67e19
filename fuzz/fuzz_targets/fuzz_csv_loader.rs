#![no_main]

use cellpeak::dataset::Dataset;
use cellpeak::loader::CsvLoader;
use cellpeak::metadata::DatasetInfo;
use cellpeak::steps::make_step_table;
use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    // Malformed exports must fail with an error, never panic
    for delimiter in [b',', b';', b'\t'] {
        let loader = CsvLoader::new().with_delimiter(delimiter);
        let table = match loader.read_table(Cursor::new(data)) {
            Ok(table) => table,
            Err(_) => continue,
        };

        // Whatever parses must also survive step classification
        if table.is_empty() {
            continue;
        }
        let mut dataset = Dataset::from_raw(table, DatasetInfo::new("fuzz"));
        let _ = make_step_table(&mut dataset, None);
    }
});
