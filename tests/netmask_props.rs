// Property tests for lookup results over arbitrary addresses

mod common;

use common::{sample_asn_db, sample_country_db, sample_country_v6_db};
use geodat::country::COUNTRY_CODES;
use geodat::Database;
use proptest::prelude::*;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::OnceLock;

fn country_db() -> &'static Database {
    static DB: OnceLock<Database> = OnceLock::new();
    DB.get_or_init(|| Database::from_bytes(sample_country_db()).unwrap())
}

fn country_v6_db() -> &'static Database {
    static DB: OnceLock<Database> = OnceLock::new();
    DB.get_or_init(|| Database::from_bytes(sample_country_v6_db()).unwrap())
}

fn asn_db() -> &'static Database {
    static DB: OnceLock<Database> = OnceLock::new();
    DB.get_or_init(|| Database::from_bytes(sample_asn_db()).unwrap())
}

proptest! {
    #[test]
    fn ipv4_country_results_are_well_formed(raw in any::<u32>()) {
        let ip = Ipv4Addr::from(raw).to_string();
        let result = country_db().country_by_address(&ip).unwrap();

        prop_assert!(result.netmask <= 32);
        if result.is_found() {
            prop_assert!(COUNTRY_CODES[1..].contains(&result.value.as_str()));
            prop_assert!(result.netmask > 0);
        } else {
            prop_assert_eq!(result.netmask, 0);
        }
    }

    #[test]
    fn ipv6_country_netmask_in_range(raw in any::<u128>()) {
        let ip = Ipv6Addr::from(raw).to_string();
        let result = country_v6_db().country_by_address_v6(&ip).unwrap();

        prop_assert!(result.netmask <= 128);
        if result.is_found() {
            prop_assert!(COUNTRY_CODES[1..].contains(&result.value.as_str()));
        }
    }

    #[test]
    fn ipv4_through_v6_tree_netmask_in_range(raw in any::<u32>()) {
        let found = country_v6_db().lookup(Ipv4Addr::from(raw).into()).unwrap();
        if let Some(found) = found {
            prop_assert!(found.netmask <= 32);
        }
    }

    #[test]
    fn lookups_are_deterministic(raw in any::<u32>()) {
        let ip = Ipv4Addr::from(raw).to_string();
        let first = asn_db().name_by_address(&ip).unwrap();
        let second = asn_db().name_by_address(&ip).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn network_members_share_the_result(host in 0u8..=255) {
        let ip = Ipv4Addr::new(8, 8, 8, host).to_string();
        let result = country_db().country_by_address(&ip).unwrap();
        prop_assert_eq!(result.value, "US");
        prop_assert_eq!(result.netmask, 24);
    }

    #[test]
    fn arbitrary_text_never_panics(text in ".{0,40}") {
        let _ = country_db().country_by_address(&text);
        let _ = asn_db().name_by_address(&text);
        let _ = country_v6_db().country_by_address_v6(&text);
    }
}
