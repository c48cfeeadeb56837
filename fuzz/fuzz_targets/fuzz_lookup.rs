#![no_main]
use libfuzzer_sys::fuzz_target;
use std::net::IpAddr;

// Country database: 0.0.0.0/1 -> US, 128.0.0.0/1 -> no data
const COUNTRY_DB: &[u8] = &[0xE1, 0xFF, 0xFF, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01];

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(db) = geodat::Database::from_bytes(COUNTRY_DB.to_vec()) {
        // Address parsing edge cases, malformed addresses, etc.
        let _ = db.country_by_address(s);
        let _ = db.id_by_address(s);

        if let Ok(ip) = s.parse::<IpAddr>() {
            let _ = db.lookup(ip);
        }
    }
});
