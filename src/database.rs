//! Lookup API
//!
//! [`Database`] owns one loaded `.dat` buffer plus the structural parameters
//! parsed from its trailer. Every lookup is a read-only walk of the buffer,
//! so a single handle can be shared between threads without locking.
//!
//! The edition decides which calls are meaningful:
//! - country editions serve [`Database::country_by_address`] and its v6 form
//! - organization, ISP, ASN and similar editions serve
//!   [`Database::name_by_address`] and its v6 form
//! - any decodable edition serves [`Database::lookup`]
//!
//! Calls the edition cannot serve fail with
//! [`GeoIpError::UnsupportedEdition`].

use crate::dat::{
    AddressKey, DatHeader, Descent, Edition, IpVersion, Record, RecordDecoder,
    RecordKind, SearchTree,
};
use crate::error::{CandidateFailure, GeoIpError, Result};
use crate::options::{LoadMode, OpenOptions};
use crate::storage::Storage;
use crate::validation::{self, ValidationReport};
use serde::Serialize;
use std::fs;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::path::{Path, PathBuf};

/// Bits of the `::ffff:0:0/96` prefix that precede a mapped IPv4 address
const V4_MAPPED_PREFIX_LEN: u8 = 96;

/// Result of a string lookup: the decoded value and the matched prefix length
///
/// An address with no data yields an empty value and netmask 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LookupResult {
    /// Country code or record name, empty when nothing matched
    pub value: String,
    /// Prefix length of the matched network
    pub netmask: u8,
}

impl LookupResult {
    /// Whether the address matched a record
    pub fn is_found(&self) -> bool {
        !self.value.is_empty()
    }
}

/// Result of a typed lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordMatch {
    /// Decoded record
    pub record: Record,
    /// Prefix length of the matched network
    pub netmask: u8,
}

/// Summary of an opened database
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatabaseMetadata {
    /// Edition from the trailer
    pub edition: Edition,
    /// Numeric edition id
    pub edition_id: u8,
    /// Human readable edition name
    pub description: &'static str,
    /// Bytes per tree record
    pub record_length: usize,
    /// Node/terminal threshold
    pub segment_count: u32,
    /// Tree address family
    pub ip_version: IpVersion,
    /// Buffer size in bytes
    pub size: usize,
    /// Whether the buffer is memory-mapped
    pub mmap: bool,
    /// Info string, when present
    pub info: Option<String>,
}

/// A loaded legacy GeoIP database
///
/// # Examples
///
/// ```no_run
/// use geodat::Database;
///
/// let db = Database::open(["/usr/share/GeoIP/GeoIP.dat"])?;
///
/// let result = db.country_by_address("8.8.8.8")?;
/// println!("{}/{}", result.value, result.netmask);
/// # Ok::<(), geodat::GeoIpError>(())
/// ```
pub struct Database {
    storage: Storage,
    header: DatHeader,
    info: Option<String>,
    path: Option<PathBuf>,
}

impl Database {
    /// Open the first valid database among `candidates`
    ///
    /// An empty list falls back to [`DEFAULT_PATHS`](crate::DEFAULT_PATHS).
    pub fn open<I, P>(candidates: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        OpenOptions::new().paths(candidates).open()
    }

    /// Start building open options
    pub fn options() -> OpenOptions {
        OpenOptions::new()
    }

    /// Open with explicit options
    ///
    /// Candidates that cannot be stat'ed are skipped. Candidates that exist
    /// but fail to load are collected into [`GeoIpError::Open`] when nothing else succeeds.
    pub fn open_with_options(options: &OpenOptions) -> Result<Self> {
        let candidates = options.candidates();
        let mut failures = Vec::new();

        for path in &candidates {
            if let Err(err) = fs::metadata(path) {
                log::info!("skipping {}: {}", path.display(), err);
                continue;
            }

            match Self::open_file(path, options.load_mode()) {
                Ok(db) => {
                    log::debug!(
                        "opened {} ({}, {} bytes)",
                        path.display(),
                        db.header.edition,
                        db.storage.len()
                    );
                    return Ok(db);
                }
                Err(err) => {
                    log::warn!("skipping {}: {}", path.display(), err);
                    failures.push(CandidateFailure {
                        path: path.clone(),
                        error: Box::new(err),
                    });
                }
            }
        }

        if failures.is_empty() {
            Err(GeoIpError::NotFound { candidates })
        } else {
            Err(GeoIpError::Open { failures })
        }
    }

    /// Open a single database file
    pub fn open_file<P: AsRef<Path>>(path: P, mode: LoadMode) -> Result<Self> {
        let path = path.as_ref();
        let storage = Storage::load(path, mode)?;
        let mut db = Self::from_storage(storage)?;
        db.path = Some(path.to_path_buf());
        Ok(db)
    }

    /// Create a database from an in-memory buffer
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::from_storage(Storage::Owned(data))
    }

    fn from_storage(storage: Storage) -> Result<Self> {
        let data = storage.as_slice();
        let header = DatHeader::from_file(data)?;
        let info = header.info(data);

        Ok(Self {
            storage,
            header,
            info,
            path: None,
        })
    }

    /// Country code for an IPv4 address
    pub fn country_by_address(&self, ip: &str) -> Result<LookupResult> {
        self.require(IpVersion::V4, "country_by_address", is_country)?;
        let addr = parse_v4(ip)?;
        self.lookup_value(IpAddr::V4(addr))
    }

    /// Country code for an IPv6 address
    pub fn country_by_address_v6(&self, ip: &str) -> Result<LookupResult> {
        self.require(IpVersion::V6, "country_by_address_v6", is_country)?;
        let addr = parse_v6(ip)?;
        self.lookup_value(IpAddr::V6(addr))
    }

    /// Name record (organization, ISP, ASN, ...) for an IPv4 address
    pub fn name_by_address(&self, ip: &str) -> Result<LookupResult> {
        self.require(IpVersion::V4, "name_by_address", is_name)?;
        let addr = parse_v4(ip)?;
        self.lookup_value(IpAddr::V4(addr))
    }

    /// Name record for an IPv6 address
    pub fn name_by_address_v6(&self, ip: &str) -> Result<LookupResult> {
        self.require(IpVersion::V6, "name_by_address_v6", is_name)?;
        let addr = parse_v6(ip)?;
        self.lookup_value(IpAddr::V6(addr))
    }

    /// Name record for an address of either family, empty when unmatched
    pub fn org_by_address(&self, ip: &str) -> Result<String> {
        if !is_name(self.header.edition) {
            return Err(self.unsupported("org_by_address"));
        }
        let addr = parse_ip(ip)?;
        Ok(self.lookup_value(addr)?.value)
    }

    /// Raw terminal id and netmask for id-valued editions
    ///
    /// Country, proxy and netspeed editions store small integers in their
    /// terminal records. Returns `None` when the address has no data.
    pub fn id_by_address(&self, ip: &str) -> Result<Option<(u32, u8)>> {
        if !self.header.edition.has_ids() {
            return Err(self.unsupported("id_by_address"));
        }
        let addr = parse_ip(ip)?;
        match self.descend(addr)? {
            (Descent::Terminal { data_offset, .. }, netmask) => Ok(Some((data_offset, netmask))),
            (Descent::NoMatch { .. }, _) => Ok(None),
        }
    }

    /// Typed lookup of an address of either family
    ///
    /// IPv4 addresses on IPv6 trees are looked up as `::ffff:a.b.c.d` and
    /// their netmask is reported relative to 32 bits.
    pub fn lookup(&self, addr: IpAddr) -> Result<Option<RecordMatch>> {
        let kind = self.header.edition.record_kind();
        if kind == RecordKind::Opaque {
            return Err(self.unsupported("lookup"));
        }

        match self.descend(addr)? {
            (Descent::Terminal { data_offset, .. }, netmask) => {
                let record = self.decoder().decode(data_offset, kind)?;
                Ok(Some(RecordMatch { record, netmask }))
            }
            (Descent::NoMatch { .. }, _) => Ok(None),
        }
    }

    /// Edition from the trailer
    pub fn edition(&self) -> Edition {
        self.header.edition
    }

    /// Address family of the search tree
    pub fn ip_version(&self) -> IpVersion {
        self.header.ip_version
    }

    /// Info string embedded before the trailer
    pub fn info(&self) -> Option<&str> {
        self.info.as_deref()
    }

    /// Path the database was loaded from
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Parsed structural parameters
    pub fn header(&self) -> &DatHeader {
        &self.header
    }

    /// Summary of the database
    pub fn metadata(&self) -> DatabaseMetadata {
        let edition = self.header.edition;
        DatabaseMetadata {
            edition,
            edition_id: edition.id(),
            description: edition.description(),
            record_length: self.header.record_length.bytes(),
            segment_count: self.header.segment_count,
            ip_version: self.header.ip_version,
            size: self.storage.len(),
            mmap: self.storage.is_mmap(),
            info: self.info.clone(),
        }
    }

    /// Walk the whole tree and report structural problems
    pub fn validate(&self) -> ValidationReport {
        validation::validate_tree(self.storage.as_slice(), &self.header)
    }

    /// Release the buffer
    pub fn close(self) {
        log::debug!("closing {} database", self.header.edition);
    }

    fn decoder(&self) -> RecordDecoder<'_> {
        RecordDecoder::new(self.storage.as_slice(), &self.header)
    }

    fn lookup_value(&self, addr: IpAddr) -> Result<LookupResult> {
        match self.descend(addr)? {
            (Descent::Terminal { data_offset, .. }, netmask) => {
                let record = self
                    .decoder()
                    .decode(data_offset, self.header.edition.record_kind())?;
                Ok(LookupResult {
                    value: record.primary().to_string(),
                    netmask,
                })
            }
            (Descent::NoMatch { .. }, _) => Ok(LookupResult::default()),
        }
    }

    /// Walk the tree for `addr`, returning the descent and the netmask in
    /// the address's own family
    fn descend(&self, addr: IpAddr) -> Result<(Descent, u8)> {
        let tree = SearchTree::new(self.storage.as_slice(), &self.header);

        match (self.header.ip_version, addr) {
            (IpVersion::V4, IpAddr::V4(v4)) => {
                let descent = tree.walk(AddressKey::v4(v4))?;
                Ok((descent, descent.depth()))
            }
            (IpVersion::V4, IpAddr::V6(v6)) => {
                let v4 = v6.to_ipv4_mapped().ok_or_else(|| {
                    GeoIpError::InvalidAddress(format!(
                        "{} cannot be looked up in an IPv4 database",
                        v6
                    ))
                })?;
                let descent = tree.walk(AddressKey::v4(v4))?;
                Ok((descent, descent.depth()))
            }
            (IpVersion::V6, IpAddr::V4(v4)) => {
                let descent = tree.walk(AddressKey::v6(v4.to_ipv6_mapped()))?;
                Ok((descent, descent.depth().saturating_sub(V4_MAPPED_PREFIX_LEN)))
            }
            (IpVersion::V6, IpAddr::V6(v6)) => {
                let descent = tree.walk(AddressKey::v6(v6))?;
                Ok((descent, descent.depth()))
            }
        }
    }

    fn require(
        &self,
        version: IpVersion,
        operation: &'static str,
        accepts: fn(Edition) -> bool,
    ) -> Result<()> {
        let edition = self.header.edition;
        if edition.ip_version() == version && accepts(edition) {
            Ok(())
        } else {
            Err(self.unsupported(operation))
        }
    }

    fn unsupported(&self, operation: &'static str) -> GeoIpError {
        GeoIpError::UnsupportedEdition {
            edition: self.header.edition,
            operation,
        }
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("edition", &self.header.edition)
            .field("path", &self.path)
            .field("storage", &self.storage)
            .finish()
    }
}

fn is_country(edition: Edition) -> bool {
    edition.record_kind() == RecordKind::Country
}

fn is_name(edition: Edition) -> bool {
    matches!(
        edition.record_kind(),
        RecordKind::Organization | RecordKind::Asn
    )
}

fn parse_v4(ip: &str) -> Result<Ipv4Addr> {
    ip.parse()
        .map_err(|_| GeoIpError::InvalidAddress(ip.to_string()))
}

fn parse_v6(ip: &str) -> Result<Ipv6Addr> {
    ip.parse()
        .map_err(|_| GeoIpError::InvalidAddress(ip.to_string()))
}

fn parse_ip(ip: &str) -> Result<IpAddr> {
    ip.parse()
        .map_err(|_| GeoIpError::InvalidAddress(ip.to_string()))
}
