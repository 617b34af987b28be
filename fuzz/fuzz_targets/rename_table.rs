#![no_main]

use libfuzzer_sys::fuzz_target;
use remapper::mapping::RenameTable;

fuzz_target!(|data: &[u8]| {
    if let Ok(table) = RenameTable::from_mem(data.to_vec()) {
        for record in table.iter() {
            let _ = table.resolve_class_reverse(&record.renamed);
            for (key, _) in record.members() {
                let _ = table.resolve_member(&record.original, key.name(), key.descriptor());
            }
        }
    }
});
