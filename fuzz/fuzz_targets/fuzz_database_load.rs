#![no_main]
use libfuzzer_sys::fuzz_target;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

fuzz_target!(|data: &[u8]| {
    // Garbage buffers must be rejected or answer lookups without panicking
    if let Ok(db) = geodat::Database::from_bytes(data.to_vec()) {
        let _ = db.lookup(IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8)));
        let _ = db.lookup(IpAddr::V6(Ipv6Addr::LOCALHOST));
        let _ = db.country_by_address("1.2.3.4");
        let _ = db.name_by_address("1.2.3.4");
        let _ = db.validate();
    }
});
