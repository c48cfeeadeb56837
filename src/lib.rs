//! geodat - Reader for legacy GeoIP `.dat` databases
//!
//! geodat opens the binary country, organization, ISP and ASN databases of
//! the legacy GeoIP format and answers address lookups with the stored value
//! and the prefix length of the matched network.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use geodat::Database;
//!
//! // Empty candidate list: try the standard install locations
//! let db = Database::open(Vec::<std::path::PathBuf>::new())?;
//!
//! let result = db.country_by_address("8.8.8.8")?;
//! if result.is_found() {
//!     println!("{} (/{})", result.value, result.netmask);
//! }
//! # Ok::<(), geodat::GeoIpError>(())
//! ```
//!
//! Name editions work the same way:
//!
//! ```rust,no_run
//! use geodat::Database;
//!
//! let db = Database::options()
//!     .path("/usr/share/GeoIP/GeoIPASNum.dat")
//!     .mmap()
//!     .open()?;
//!
//! let asn = db.name_by_address("8.8.8.8")?;
//! println!("{}", asn.value);
//! # Ok::<(), geodat::GeoIpError>(())
//! ```
//!
//! # Key Features
//!
//! - **Candidate Paths**: first valid file of a configurable list wins
//! - **Memory or Mmap**: read the file into memory or map it read-only
//! - **Gzip**: `.dat.gz` files are decompressed transparently
//! - **Thread Safe**: a `Database` is `Send + Sync`, lookups never lock
//! - **Validation**: full tree walk that reports structural damage
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │  Loader (options, storage)           │
//! │  candidate paths → buffer → trailer  │
//! └──────────────────────────────────────┘
//!          ↓ DatHeader
//! ┌──────────────────────────────────────┐
//! │  Search Tree Walker (dat::tree)      │
//! │  address bits → terminal + depth     │
//! └──────────────────────────────────────┘
//!          ↓ data offset
//! ┌──────────────────────────────────────┐
//! │  Record Decoder (dat::record)        │
//! │  country id / NUL-terminated name    │
//! └──────────────────────────────────────┘
//!          ↓
//! ┌──────────────────────────────────────┐
//! │  Lookup Facade (database)            │
//! │  (value, netmask)                    │
//! └──────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Country code and name tables
pub mod country;
/// Legacy binary format: trailer, tree and records
pub mod dat;
/// Lookup API
pub mod database;
/// Error types for geodat operations
pub mod error;
pub mod options;
pub mod storage;
pub mod validation;

// Re-exports for Rust consumers

/// Loaded database and lookup results
pub use crate::database::{Database, DatabaseMetadata, LookupResult, RecordMatch};

pub use crate::dat::{Edition, IpVersion, Record};
pub use crate::error::{CandidateFailure, GeoIpError, Result};
pub use crate::options::{LoadMode, OpenOptions, DEFAULT_PATHS};
pub use crate::validation::{TreeStats, ValidationReport};

// Version information
/// Library version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library major version
pub const VERSION_MAJOR: u32 = 0;

/// Library minor version
pub const VERSION_MINOR: u32 = 1;

/// Library patch version
pub const VERSION_PATCH: u32 = 0;
