//! Terminal record decoding
//!
//! Country editions store the country id directly in the terminal value.
//! Name editions (organization, ISP, ASN, ...) point into the data segment
//! at a NUL-terminated string.

use super::format::DatHeader;
use super::types::{RecordKind, MAX_ORG_RECORD_LENGTH};
use crate::country::{COUNTRY_CODES, COUNTRY_COUNT, COUNTRY_NAMES};
use crate::error::{GeoIpError, Result};
use serde::Serialize;

/// A decoded terminal record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Record {
    /// Country edition record
    Country {
        /// Index into the country tables
        id: u32,
        /// Two-letter code
        code: &'static str,
        /// English name
        name: &'static str,
    },
    /// Organization, ISP, domain and similar name records
    Organization {
        /// Decoded name
        name: String,
    },
    /// Autonomous system record, e.g. `AS15169 Google Inc.`
    Asn {
        /// Decoded name
        name: String,
    },
}

impl Record {
    /// The primary string of the record: country code or name
    pub fn primary(&self) -> &str {
        match self {
            Record::Country { code, .. } => code,
            Record::Organization { name } | Record::Asn { name } => name,
        }
    }
}

/// Decodes terminal values against a loaded buffer
pub struct RecordDecoder<'a> {
    data: &'a [u8],
    header: &'a DatHeader,
}

impl<'a> RecordDecoder<'a> {
    /// Create a decoder over the loaded buffer
    pub fn new(data: &'a [u8], header: &'a DatHeader) -> Self {
        Self { data, header }
    }

    /// Decode the record at `data_offset` as `kind`
    pub fn decode(&self, data_offset: u32, kind: RecordKind) -> Result<Record> {
        match kind {
            RecordKind::Country => decode_country(data_offset),
            RecordKind::Organization => Ok(Record::Organization {
                name: self.read_name(data_offset)?,
            }),
            RecordKind::Asn => Ok(Record::Asn {
                name: self.read_name(data_offset)?,
            }),
            RecordKind::Opaque => Err(GeoIpError::Decode(format!(
                "{} records cannot be decoded",
                self.header.edition
            ))),
        }
    }

    /// Read the NUL-terminated string at `data_offset` in the data segment
    fn read_name(&self, data_offset: u32) -> Result<String> {
        let start = self
            .header
            .tree_size
            .checked_add(data_offset as usize)
            .filter(|&start| start < self.header.data_end)
            .ok_or_else(|| {
                GeoIpError::Decode(format!(
                    "data offset {} outside data segment [{}, {})",
                    data_offset, self.header.tree_size, self.header.data_end
                ))
            })?;

        let end = self.header.data_end.min(start + MAX_ORG_RECORD_LENGTH);
        let window = &self.data[start..end];
        let len = memchr::memchr(0, window).unwrap_or(window.len());

        Ok(decode_name(&window[..len]))
    }
}

/// UTF-8 when valid, otherwise ISO-8859-1 mapped byte for byte
fn decode_name(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(name) => name.to_string(),
        Err(_) => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}

fn decode_country(id: u32) -> Result<Record> {
    let index = id as usize;
    if index >= COUNTRY_COUNT {
        return Err(GeoIpError::Decode(format!(
            "country id {} outside the country table",
            id
        )));
    }
    Ok(Record::Country {
        id,
        code: COUNTRY_CODES[index],
        name: COUNTRY_NAMES[index],
    })
}
