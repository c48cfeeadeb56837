//! Test fixture writer for legacy `.dat` databases
//!
//! Builds the binary tree with arena-allocated nodes, then serializes it with
//! little-endian records, the data segment, an optional info block and the
//! structure trailer.

#![allow(dead_code)]

use geodat::country::country_id;
use geodat::Edition;
use std::collections::HashMap;
use std::net::IpAddr;
use std::path::Path;

/// A node in the fixture tree
#[derive(Debug, Clone, Copy)]
struct Node {
    left: Pointer,
    right: Pointer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pointer {
    Node(u32),
    /// Terminal value (country id or data offset) and the prefix length it
    /// was inserted with
    Data(u32, u8),
    Empty,
}

impl Node {
    fn empty() -> Self {
        Self {
            left: Pointer::Empty,
            right: Pointer::Empty,
        }
    }

    fn child(&self, bit: u8) -> Pointer {
        if bit == 0 {
            self.left
        } else {
            self.right
        }
    }

    fn set_child(&mut self, bit: u8, pointer: Pointer) {
        if bit == 0 {
            self.left = pointer;
        } else {
            self.right = pointer;
        }
    }
}

/// Writer for legacy GeoIP databases
pub struct DatWriter {
    edition: Edition,
    nodes: Vec<Node>,
    data: Vec<u8>,
    names: HashMap<String, u32>,
    info: Option<String>,
}

impl DatWriter {
    /// Create a writer for `edition`
    pub fn new(edition: Edition) -> Self {
        Self {
            edition,
            nodes: vec![Node::empty()],
            // offset 0 would collide with the empty sentinel
            data: vec![0],
            names: HashMap::new(),
            info: None,
        }
    }

    /// Embed an info string before the trailer
    pub fn with_info(mut self, info: &str) -> Self {
        self.info = Some(info.to_string());
        self
    }

    /// Map `cidr` to a country code
    pub fn insert_country(&mut self, cidr: &str, code: &str) -> &mut Self {
        let id = country_id(code).unwrap_or_else(|| panic!("unknown country code {}", code));
        self.insert_value(cidr, id)
    }

    /// Map `cidr` to a name record
    pub fn insert_name(&mut self, cidr: &str, name: &str) -> &mut Self {
        let offset = match self.names.get(name) {
            Some(&offset) => offset,
            None => {
                let offset = self.push_name(name.as_bytes());
                self.names.insert(name.to_string(), offset);
                offset
            }
        };
        self.insert_value(cidr, offset)
    }

    /// Map `cidr` to a name record stored as raw bytes, e.g. ISO-8859-1 text
    pub fn insert_name_bytes(&mut self, cidr: &str, name: &[u8]) -> &mut Self {
        let offset = self.push_name(name);
        self.insert_value(cidr, offset)
    }

    fn push_name(&mut self, name: &[u8]) -> u32 {
        let offset = self.data.len() as u32;
        self.data.extend_from_slice(name);
        self.data.push(0);
        offset
    }

    /// Map `cidr` to a raw terminal value
    pub fn insert_value(&mut self, cidr: &str, value: u32) -> &mut Self {
        assert!(value > 0, "terminal value 0 is the empty sentinel");
        let (bits, prefix_len) = self.parse_cidr(cidr);
        self.insert_bits(bits, prefix_len, value);
        self
    }

    /// Number of tree nodes
    pub fn node_count(&self) -> u32 {
        self.nodes.len() as u32
    }

    /// Serialize the database
    pub fn build(&self) -> Vec<u8> {
        let record_length = self.edition.record_length().bytes();
        let segments = self
            .edition
            .fixed_segments()
            .unwrap_or_else(|| self.node_count());

        let mut out = Vec::with_capacity(self.nodes.len() * record_length * 2 + self.data.len());
        for node in &self.nodes {
            for pointer in [node.left, node.right] {
                let value = match pointer {
                    Pointer::Empty => segments,
                    Pointer::Node(id) => id,
                    Pointer::Data(value, _) => segments + value,
                };
                out.extend_from_slice(&value.to_le_bytes()[..record_length]);
            }
        }

        if self.edition.fixed_segments().is_none() {
            out.extend_from_slice(&self.data);
        }

        if let Some(info) = &self.info {
            out.extend_from_slice(&[0, 0, 0]);
            out.extend_from_slice(info.as_bytes());
        }

        out.extend_from_slice(&[0xFF, 0xFF, 0xFF, self.edition.id()]);
        if self.edition.fixed_segments().is_none() {
            out.extend_from_slice(&segments.to_le_bytes()[..3]);
        }
        out
    }

    /// Serialize to a file
    pub fn write_to(&self, path: &Path) {
        std::fs::write(path, self.build()).unwrap();
    }

    /// Address bits left-aligned in a u128, and the prefix length in tree bits
    fn parse_cidr(&self, cidr: &str) -> (u128, u8) {
        let (addr, prefix) = match cidr.split_once('/') {
            Some((addr, prefix)) => (addr, Some(prefix.parse::<u8>().unwrap())),
            None => (cidr, None),
        };
        let addr: IpAddr = addr.parse().unwrap();

        let v6_tree = self.edition.ip_version() == geodat::IpVersion::V6;
        let (bits, prefix_len) = match (addr, v6_tree) {
            (IpAddr::V4(v4), false) => (
                u128::from(u32::from(v4)) << 96,
                prefix.unwrap_or(32),
            ),
            (IpAddr::V4(v4), true) => (
                u128::from(v4.to_ipv6_mapped()),
                96 + prefix.unwrap_or(32),
            ),
            (IpAddr::V6(v6), true) => (u128::from(v6), prefix.unwrap_or(128)),
            (IpAddr::V6(_), false) => panic!("IPv6 network {} in an IPv4 tree", cidr),
        };
        assert!(prefix_len > 0, "prefix /0 has no tree edge");
        (bits, prefix_len)
    }

    fn insert_bits(&mut self, bits: u128, prefix_len: u8, value: u32) {
        let mut node_id = 0usize;

        for depth in 0..prefix_len {
            let bit = ((bits >> (127 - depth)) & 1) as u8;
            let child = self.nodes[node_id].child(bit);

            if depth + 1 == prefix_len {
                match child {
                    Pointer::Empty => {
                        self.nodes[node_id].set_child(bit, Pointer::Data(value, prefix_len))
                    }
                    Pointer::Data(_, existing) if prefix_len >= existing => {
                        self.nodes[node_id].set_child(bit, Pointer::Data(value, prefix_len))
                    }
                    Pointer::Data(..) => {}
                    Pointer::Node(id) => self.backfill(id as usize, value, prefix_len),
                }
                return;
            }

            node_id = match child {
                Pointer::Node(id) => id as usize,
                Pointer::Empty => {
                    let id = self.allocate();
                    self.nodes[node_id].set_child(bit, Pointer::Node(id as u32));
                    id
                }
                Pointer::Data(existing, existing_len) => {
                    // split the less specific leaf, both halves keep its value
                    let id = self.allocate();
                    self.nodes[id].left = Pointer::Data(existing, existing_len);
                    self.nodes[id].right = Pointer::Data(existing, existing_len);
                    self.nodes[node_id].set_child(bit, Pointer::Node(id as u32));
                    id
                }
            };
        }
    }

    fn allocate(&mut self) -> usize {
        self.nodes.push(Node::empty());
        self.nodes.len() - 1
    }

    fn backfill(&mut self, node_id: usize, value: u32, prefix_len: u8) {
        for bit in 0..2u8 {
            match self.nodes[node_id].child(bit) {
                Pointer::Empty => self.nodes[node_id].set_child(bit, Pointer::Data(value, prefix_len)),
                Pointer::Data(_, existing) if prefix_len > existing => {
                    self.nodes[node_id].set_child(bit, Pointer::Data(value, prefix_len))
                }
                Pointer::Data(..) => {}
                Pointer::Node(id) => self.backfill(id as usize, value, prefix_len),
            }
        }
    }
}

/// Country database with a handful of well-known networks
pub fn sample_country_db() -> Vec<u8> {
    let mut writer = DatWriter::new(Edition::Country).with_info("GEO-106FREE 20240101 Build 1");
    writer
        .insert_country("8.8.8.0/24", "US")
        .insert_country("81.2.69.0/24", "GB")
        .insert_country("85.214.0.0/15", "DE")
        .insert_country("24.0.0.0/8", "CA")
        .insert_country("24.24.24.0/24", "US");
    writer.build()
}

/// ASN database with a few autonomous systems
pub fn sample_asn_db() -> Vec<u8> {
    let mut writer = DatWriter::new(Edition::Asnum).with_info("GEO-117 20240101 Build 1");
    writer
        .insert_name("8.8.8.0/24", "AS15169 Google LLC")
        .insert_name("8.8.4.0/24", "AS15169 Google LLC")
        .insert_name("1.1.1.0/24", "AS13335 Cloudflare, Inc.")
        .insert_name("81.2.69.0/24", "AS20712 Andrews & Arnold Ltd");
    writer.build()
}

/// IPv6 country database, including one IPv4-mapped network
pub fn sample_country_v6_db() -> Vec<u8> {
    let mut writer = DatWriter::new(Edition::CountryV6);
    writer
        .insert_country("2001:4860::/32", "US")
        .insert_country("2a00:1450::/29", "IE")
        .insert_country("8.8.8.0/24", "US");
    writer.build()
}
