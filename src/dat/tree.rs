//! Legacy GeoIP Search Tree Traversal
//!
//! The tree is a binary trie over address bits. Node `n` sits at byte offset
//! `n * 2 * record_length` and holds two little-endian records:
//! - left record, followed when the address bit is 0
//! - right record, followed when the address bit is 1
//!
//! Each record is one of:
//! - a node index (`< segment_count`), continue traversal
//! - the empty sentinel (`== segment_count`), no data for this block
//! - a terminal value (`> segment_count`), data offset `value - segment_count`

use super::format::{read_le, DatHeader};
use crate::error::{GeoIpError, Result};
use std::net::{Ipv4Addr, Ipv6Addr};

/// Fixed-width address key walked most significant bit first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressKey {
    /// Address bits, right-aligned
    pub bits: u128,
    /// Number of significant bits (32 or 128)
    pub width: u8,
}

impl AddressKey {
    /// Key for a 32-bit tree
    pub fn v4(addr: Ipv4Addr) -> Self {
        Self {
            bits: u128::from(u32::from(addr)),
            width: 32,
        }
    }

    /// Key for a 128-bit tree
    pub fn v6(addr: Ipv6Addr) -> Self {
        Self {
            bits: u128::from(addr),
            width: 128,
        }
    }

    #[inline]
    fn bit(&self, index: u8) -> u8 {
        ((self.bits >> (self.width - 1 - index)) & 1) as u8
    }
}

/// Outcome of a tree descent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Descent {
    /// Reached a terminal record
    Terminal {
        /// Value minus segment count
        data_offset: u32,
        /// Address bits consumed
        depth: u8,
    },
    /// Reached the empty sentinel
    NoMatch {
        /// Address bits consumed
        depth: u8,
    },
}

impl Descent {
    /// Address bits consumed before the descent stopped
    pub fn depth(&self) -> u8 {
        match *self {
            Descent::Terminal { depth, .. } | Descent::NoMatch { depth } => depth,
        }
    }
}

/// Search tree over a loaded database buffer
pub struct SearchTree<'a> {
    /// The raw file data containing the tree
    data: &'a [u8],
    /// Parsed header information
    header: &'a DatHeader,
}

impl<'a> SearchTree<'a> {
    /// Create a new search tree
    pub fn new(data: &'a [u8], header: &'a DatHeader) -> Self {
        Self { data, header }
    }

    /// Walk `key` from the root node
    pub fn walk(&self, key: AddressKey) -> Result<Descent> {
        self.walk_from(key, 0)
    }

    /// Walk `key` from `start`, bounded by the key width
    pub fn walk_from(&self, key: AddressKey, start: u32) -> Result<Descent> {
        let segments = self.header.segment_count;
        let mut node = start;

        for index in 0..key.width {
            let record = self.read_record(node, key.bit(index))?;
            let depth = index + 1;

            if record == segments {
                return Ok(Descent::NoMatch { depth });
            } else if record > segments {
                return Ok(Descent::Terminal {
                    data_offset: record - segments,
                    depth,
                });
            }
            node = record;
        }

        Err(GeoIpError::CorruptTree(format!(
            "no terminal record after {} bits",
            key.width
        )))
    }

    /// Read one record of a node
    ///
    /// `side` 0 reads the left record, 1 the right record.
    pub fn read_record(&self, node: u32, side: u8) -> Result<u32> {
        let width = self.header.record_length.bytes();
        let offset = node as usize * self.header.record_length.node_bytes() + side as usize * width;

        if offset + width > self.header.tree_size {
            return Err(GeoIpError::CorruptTree(format!(
                "node {} at offset {} lies outside the tree ({} bytes)",
                node, offset, self.header.tree_size
            )));
        }

        Ok(read_le(&self.data[offset..offset + width]))
    }
}
