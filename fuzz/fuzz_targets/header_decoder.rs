#![no_main]

use head_tracker::models::EVMHeader;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(header) = EVMHeader::from_slice(data) {
        // Anything that decodes must survive a second pass unchanged
        let encoded = serde_json::to_value(&header).unwrap();
        assert_eq!(EVMHeader::decode(encoded).unwrap(), header);
    }
});
