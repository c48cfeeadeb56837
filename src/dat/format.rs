//! Legacy GeoIP Binary Format Parsing
//!
//! A `.dat` file is laid out as:
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │  Search tree (segment_count nodes)   │
//! ├──────────────────────────────────────┤
//! │  Data segment (name records)         │
//! ├──────────────────────────────────────┤
//! │  00 00 00 + info string (optional)   │
//! ├──────────────────────────────────────┤
//! │  FF FF FF + edition [+ segments]     │
//! └──────────────────────────────────────┘
//! ```
//!
//! Only the trailer is parsed at open time. The tree and data segment stay in
//! the loaded buffer and are read in place per lookup.

use super::types::{
    Edition, IpVersion, RecordLength, COUNTRY_BEGIN, DATABASE_INFO_MAX_SIZE, INFO_DELIMITER,
    SEGMENT_RECORD_LENGTH, STRUCTURE_INFO_MAX_SIZE, STRUCTURE_MARKER,
};
use crate::error::{GeoIpError, Result};

/// Longest info string, matching the fixed-size read of the legacy format
const INFO_MAX_LEN: usize = DATABASE_INFO_MAX_SIZE - 1;

/// Structural parameters derived from the trailer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatHeader {
    /// Database edition
    pub edition: Edition,
    /// Width of each tree record
    pub record_length: RecordLength,
    /// Threshold separating node pointers from terminal values
    pub segment_count: u32,
    /// Tree address family
    pub ip_version: IpVersion,
    /// Byte offset where the data segment begins
    pub tree_size: usize,
    /// Byte offset where the data segment ends (start of the trailer)
    pub data_end: usize,
}

impl DatHeader {
    /// Parse the trailer of a loaded database buffer
    pub fn from_file(data: &[u8]) -> Result<Self> {
        if data.len() < STRUCTURE_MARKER.len() {
            return Err(GeoIpError::CorruptHeader(format!(
                "file too small: {} bytes",
                data.len()
            )));
        }

        let header = match find_structure_info(data) {
            Some(marker) => Self::from_marker(data, marker)?,
            None => {
                // Oldest files carry no trailer at all
                Self {
                    edition: Edition::Country,
                    record_length: RecordLength::Standard,
                    segment_count: COUNTRY_BEGIN,
                    ip_version: IpVersion::V4,
                    tree_size: data.len(),
                    data_end: data.len(),
                }
            }
        };

        log::trace!("parsed trailer: {:?}", header);
        Ok(header)
    }

    fn from_marker(data: &[u8], marker: usize) -> Result<Self> {
        let edition_byte = *data.get(marker + STRUCTURE_MARKER.len()).ok_or_else(|| {
            GeoIpError::CorruptHeader("structure marker is not followed by an edition".into())
        })?;
        let edition = Edition::from_byte(edition_byte).ok_or_else(|| {
            GeoIpError::CorruptHeader(format!("unrecognized edition byte {}", edition_byte))
        })?;
        let record_length = edition.record_length();

        let (segment_count, tree_size) = match edition.fixed_segments() {
            Some(segments) => (segments, marker),
            None => {
                let start = marker + STRUCTURE_MARKER.len() + 1;
                let bytes = data
                    .get(start..start + SEGMENT_RECORD_LENGTH)
                    .ok_or_else(|| {
                        GeoIpError::CorruptHeader(format!(
                            "{} trailer is missing its segment count",
                            edition
                        ))
                    })?;
                let segments = read_le(bytes);
                if segments == 0 {
                    return Err(GeoIpError::CorruptHeader(
                        "segment count is zero".to_string(),
                    ));
                }
                let tree_size = segments as usize * record_length.node_bytes();
                if tree_size > marker {
                    return Err(GeoIpError::CorruptHeader(format!(
                        "tree of {} nodes ({} bytes) overlaps the trailer at {}",
                        segments, tree_size, marker
                    )));
                }
                (segments, tree_size)
            }
        };

        // Zero runs inside the tree are not an info delimiter
        let data_end = match find_info_delimiter(data) {
            Some(info) if info >= tree_size && info < marker => info,
            _ => marker,
        };

        Ok(Self {
            edition,
            record_length,
            segment_count,
            ip_version: edition.ip_version(),
            tree_size,
            data_end,
        })
    }

    /// Info string of the buffer this header was parsed from
    ///
    /// For editions with a trailer segment count the delimiter must lie past
    /// the tree, where zero runs in node records would otherwise match.
    pub fn info(&self, data: &[u8]) -> Option<String> {
        match find_info_delimiter(data) {
            Some(pos) if self.edition.fixed_segments().is_none() && pos < self.tree_size => None,
            _ => database_info(data),
        }
    }
}

/// Find the structure marker, scanning backward from the end of the file
///
/// Returns the offset of the first `FF FF FF` found within the last
/// `STRUCTURE_INFO_MAX_SIZE` window positions.
pub fn find_structure_info(data: &[u8]) -> Option<usize> {
    scan_trailer(data, &STRUCTURE_MARKER, STRUCTURE_INFO_MAX_SIZE)
}

/// Find the info delimiter, scanning backward from the end of the file
pub fn find_info_delimiter(data: &[u8]) -> Option<usize> {
    scan_trailer(data, &INFO_DELIMITER, DATABASE_INFO_MAX_SIZE)
}

fn scan_trailer(data: &[u8], needle: &[u8; 3], window: usize) -> Option<usize> {
    (0..window)
        .map_while(|i| data.len().checked_sub(needle.len() + i))
        .find(|&pos| &data[pos..pos + needle.len()] == needle)
}

/// Extract the database info string, if the file carries one
///
/// The string ends at the first NUL, at the structure marker, or after
/// 99 bytes.
pub fn database_info(data: &[u8]) -> Option<String> {
    let start = find_info_delimiter(data)? + INFO_DELIMITER.len();
    let window = &data[start..data.len().min(start + INFO_MAX_LEN)];

    let mut end = memchr::memchr(0, window).unwrap_or(window.len());
    if let Some(marker) = memchr::memmem::find(&window[..end], &STRUCTURE_MARKER) {
        end = marker;
    }

    let info = String::from_utf8_lossy(&window[..end]).trim_end().to_string();
    if info.is_empty() {
        None
    } else {
        Some(info)
    }
}

/// Read an unsigned little-endian integer of up to 4 bytes
pub(crate) fn read_le(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .enumerate()
        .fold(0u32, |acc, (i, &b)| acc | (u32::from(b) << (8 * i)))
}
