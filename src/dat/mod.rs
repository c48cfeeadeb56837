//! Legacy GeoIP (`.dat`) Reader
//!
//! This module reads the binary format used by the legacy GeoIP country,
//! organization, ISP and ASN databases.
//!
//! ## Architecture
//!
//! - **types**: editions, record widths and structural constants
//! - **format**: trailer parsing and the database info string
//! - **tree**: search tree traversal for address lookups
//! - **record**: decoding of terminal records

pub mod format;
pub mod record;
pub mod tree;
pub mod types;

pub use format::{database_info, find_structure_info, DatHeader};
pub use record::{Record, RecordDecoder};
pub use tree::{AddressKey, Descent, SearchTree};
pub use types::{Edition, IpVersion, RecordKind, RecordLength};
