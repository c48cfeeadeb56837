//! Legacy GeoIP type definitions
//!
//! Editions, structural constants and the per-edition rules that decide how
//! a `.dat` file's tree and data segment are laid out.

use serde::Serialize;
use std::fmt;

/// Structure marker preceding the edition byte in the trailer
pub const STRUCTURE_MARKER: [u8; 3] = [0xFF, 0xFF, 0xFF];

/// Delimiter preceding the database info string
pub const INFO_DELIMITER: [u8; 3] = [0x00, 0x00, 0x00];

/// Number of trailer positions scanned for the structure marker
pub const STRUCTURE_INFO_MAX_SIZE: usize = 20;

/// Number of trailer positions scanned for the info delimiter
pub const DATABASE_INFO_MAX_SIZE: usize = 100;

/// Longest name record read from the data segment
pub const MAX_ORG_RECORD_LENGTH: usize = 300;

/// Width in bytes of the segment count stored in the trailer
pub const SEGMENT_RECORD_LENGTH: usize = 3;

/// Segment count of country, proxy and netspeed editions
pub const COUNTRY_BEGIN: u32 = 16_776_960;

/// Segment count of large country editions
pub const LARGE_COUNTRY_BEGIN: u32 = 16_515_072;

/// Segment count of region rev0 editions
pub const STATE_BEGIN_REV0: u32 = 16_700_000;

/// Segment count of region rev1 editions
pub const STATE_BEGIN_REV1: u32 = 16_000_000;

/// Edition bytes at or above this value use the old numbering
const EDITION_LEGACY_BASE: u8 = 106;

/// Address family of a search tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IpVersion {
    /// 32-bit tree
    V4,
    /// 128-bit tree
    V6,
}

impl IpVersion {
    /// Number of address bits the tree is keyed on
    pub fn width(self) -> u8 {
        match self {
            IpVersion::V4 => 32,
            IpVersion::V6 => 128,
        }
    }
}

/// Width of a single tree record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RecordLength {
    /// 3 bytes per record, 6 bytes per node
    Standard = 3,
    /// 4 bytes per record, 8 bytes per node
    Org = 4,
}

impl RecordLength {
    /// Bytes in one record
    pub fn bytes(self) -> usize {
        self as usize
    }

    /// Bytes in one node (left + right record)
    pub fn node_bytes(self) -> usize {
        self.bytes() * 2
    }
}

/// What a terminal record decodes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// Index into the country tables
    Country,
    /// NUL-terminated organization style name
    Organization,
    /// NUL-terminated "ASnnnn Name" string
    Asn,
    /// City/region style records this crate does not decode
    Opaque,
}

/// How the segment count of an edition is determined
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SegmentSource {
    Fixed(u32),
    Trailer,
}

/// Database edition stored in the trailer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[allow(missing_docs)]
pub enum Edition {
    Country = 1,
    CityRev1 = 2,
    RegionRev1 = 3,
    Isp = 4,
    Org = 5,
    CityRev0 = 6,
    RegionRev0 = 7,
    Proxy = 8,
    Asnum = 9,
    Netspeed = 10,
    Domain = 11,
    CountryV6 = 12,
    LocationA = 13,
    AccuracyRadius = 14,
    CityConfidence = 15,
    CityConfidenceDist = 16,
    LargeCountry = 17,
    LargeCountryV6 = 18,
    CityConfidenceDistIspOrg = 19,
    CcmCountry = 20,
    AsnumV6 = 21,
    IspV6 = 22,
    OrgV6 = 23,
    DomainV6 = 24,
    LocationAV6 = 25,
    Registrar = 26,
    RegistrarV6 = 27,
    UserType = 28,
    UserTypeV6 = 29,
    CityRev1V6 = 30,
    CityRev0V6 = 31,
    NetspeedRev1 = 32,
    NetspeedRev1V6 = 33,
    CountryConf = 34,
    CityConf = 35,
    RegionConf = 36,
    PostalConf = 37,
    AccuracyRadiusV6 = 38,
}

const EDITIONS: [Edition; 38] = [
    Edition::Country,
    Edition::CityRev1,
    Edition::RegionRev1,
    Edition::Isp,
    Edition::Org,
    Edition::CityRev0,
    Edition::RegionRev0,
    Edition::Proxy,
    Edition::Asnum,
    Edition::Netspeed,
    Edition::Domain,
    Edition::CountryV6,
    Edition::LocationA,
    Edition::AccuracyRadius,
    Edition::CityConfidence,
    Edition::CityConfidenceDist,
    Edition::LargeCountry,
    Edition::LargeCountryV6,
    Edition::CityConfidenceDistIspOrg,
    Edition::CcmCountry,
    Edition::AsnumV6,
    Edition::IspV6,
    Edition::OrgV6,
    Edition::DomainV6,
    Edition::LocationAV6,
    Edition::Registrar,
    Edition::RegistrarV6,
    Edition::UserType,
    Edition::UserTypeV6,
    Edition::CityRev1V6,
    Edition::CityRev0V6,
    Edition::NetspeedRev1,
    Edition::NetspeedRev1V6,
    Edition::CountryConf,
    Edition::CityConf,
    Edition::RegionConf,
    Edition::PostalConf,
    Edition::AccuracyRadiusV6,
];

impl Edition {
    /// Decode a trailer edition byte, folding the old `+105` numbering
    pub fn from_byte(byte: u8) -> Option<Self> {
        let id = if byte >= EDITION_LEGACY_BASE {
            byte - 105
        } else {
            byte
        };
        EDITIONS.get(usize::from(id).checked_sub(1)?).copied()
    }

    /// Numeric edition id
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Address family of the edition's tree
    pub fn ip_version(self) -> IpVersion {
        use Edition::*;
        match self {
            CountryV6 | LargeCountryV6 | AsnumV6 | IspV6 | OrgV6 | DomainV6 | LocationAV6
            | RegistrarV6 | UserTypeV6 | CityRev1V6 | CityRev0V6 | NetspeedRev1V6
            | AccuracyRadiusV6 => IpVersion::V6,
            _ => IpVersion::V4,
        }
    }

    /// Width of the tree records
    pub fn record_length(self) -> RecordLength {
        use Edition::*;
        match self {
            Org | OrgV6 | Isp | IspV6 | Domain | DomainV6 => RecordLength::Org,
            _ => RecordLength::Standard,
        }
    }

    fn segment_source(self) -> SegmentSource {
        use Edition::*;
        match self {
            Country | Proxy | Netspeed | CountryV6 | CcmCountry => {
                SegmentSource::Fixed(COUNTRY_BEGIN)
            }
            LargeCountry | LargeCountryV6 => SegmentSource::Fixed(LARGE_COUNTRY_BEGIN),
            RegionRev0 => SegmentSource::Fixed(STATE_BEGIN_REV0),
            RegionRev1 => SegmentSource::Fixed(STATE_BEGIN_REV1),
            _ => SegmentSource::Trailer,
        }
    }

    /// Fixed segment count, or `None` when it is stored in the trailer
    pub fn fixed_segments(self) -> Option<u32> {
        match self.segment_source() {
            SegmentSource::Fixed(n) => Some(n),
            SegmentSource::Trailer => None,
        }
    }

    /// Record layout of terminal values
    pub fn record_kind(self) -> RecordKind {
        use Edition::*;
        match self {
            Country | CountryV6 | LargeCountry | LargeCountryV6 | CcmCountry => {
                RecordKind::Country
            }
            Asnum | AsnumV6 => RecordKind::Asn,
            Org | OrgV6 | Isp | IspV6 | Domain | DomainV6 | Registrar | RegistrarV6 | UserType
            | UserTypeV6 | NetspeedRev1 | NetspeedRev1V6 => RecordKind::Organization,
            _ => RecordKind::Opaque,
        }
    }

    /// Editions whose terminal values are small integer ids
    pub fn has_ids(self) -> bool {
        use Edition::*;
        matches!(
            self,
            Country | CountryV6 | LargeCountry | LargeCountryV6 | CcmCountry | Proxy | Netspeed
        )
    }

    /// Human readable edition name
    pub fn description(self) -> &'static str {
        use Edition::*;
        match self {
            Country => "GeoIP Country Edition",
            CityRev1 => "GeoIP City Edition, Rev 1",
            RegionRev1 => "GeoIP Region Edition, Rev 1",
            Isp => "GeoIP ISP Edition",
            Org => "GeoIP Organization Edition",
            CityRev0 => "GeoIP City Edition, Rev 0",
            RegionRev0 => "GeoIP Region Edition, Rev 0",
            Proxy => "GeoIP Proxy Edition",
            Asnum => "GeoIP ASNum Edition",
            Netspeed => "GeoIP Netspeed Edition",
            Domain => "GeoIP Domain Name Edition",
            CountryV6 => "GeoIP Country V6 Edition",
            LocationA => "GeoIP LocationID ASCII Edition",
            AccuracyRadius => "GeoIP Accuracy Radius Edition",
            CityConfidence => "GeoIP City Confidence Edition",
            CityConfidenceDist => "GeoIP City Confidence Distance Edition",
            LargeCountry => "GeoIP Large Country Edition",
            LargeCountryV6 => "GeoIP Large Country V6 Edition",
            CityConfidenceDistIspOrg => "GeoIP City Confidence Distance ISP Org Edition",
            CcmCountry => "GeoIP CCM Edition",
            AsnumV6 => "GeoIP ASNum V6 Edition",
            IspV6 => "GeoIP ISP V6 Edition",
            OrgV6 => "GeoIP Organization V6 Edition",
            DomainV6 => "GeoIP Domain Name V6 Edition",
            LocationAV6 => "GeoIP LocationID ASCII V6 Edition",
            Registrar => "GeoIP Registrar Edition",
            RegistrarV6 => "GeoIP Registrar V6 Edition",
            UserType => "GeoIP UserType Edition",
            UserTypeV6 => "GeoIP UserType V6 Edition",
            CityRev1V6 => "GeoIP City Edition V6, Rev 1",
            CityRev0V6 => "GeoIP City Edition V6, Rev 0",
            NetspeedRev1 => "GeoIP Netspeed Edition, Rev 1",
            NetspeedRev1V6 => "GeoIP Netspeed Edition V6, Rev1",
            CountryConf => "GeoIP Country Confidence Edition",
            CityConf => "GeoIP City Confidence Edition",
            RegionConf => "GeoIP Region Confidence Edition",
            PostalConf => "GeoIP Postal Confidence Edition",
            AccuracyRadiusV6 => "GeoIP Accuracy Radius Edition V6",
        }
    }
}

impl fmt::Display for Edition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}
