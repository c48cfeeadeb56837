//! Structural validation of loaded databases
//!
//! Lookups only read the records on one root-to-leaf path, so a corrupt node
//! deep in the tree goes unnoticed until an address happens to reach it. The
//! validator walks every reachable node once and checks:
//!
//! - all node pointers stay inside the tree
//! - no path revisits a node (cycles would never terminate a lookup)
//! - no path runs past the address width
//! - every terminal record decodes for the edition
//!
//! # Usage
//!
//! ```rust,no_run
//! use geodat::Database;
//!
//! let db = Database::open(["/usr/share/GeoIP/GeoIPASNum.dat"])?;
//! let report = db.validate();
//!
//! if report.is_valid() {
//!     println!("ok: {}", report.stats.summary());
//! } else {
//!     for error in &report.errors {
//!         println!("  - {}", error);
//!     }
//! }
//! # Ok::<(), geodat::GeoIpError>(())
//! ```

use crate::dat::{DatHeader, RecordDecoder, RecordKind, SearchTree};
use std::collections::HashSet;

/// Errors reported individually before the rest are only counted
const MAX_REPORTED_ERRORS: usize = 20;

/// Validation report with detailed findings
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// Problems that make some lookups fail
    pub errors: Vec<String>,
    /// Suspicious but harmless findings
    pub warnings: Vec<String>,
    /// Informational messages about database properties
    pub info: Vec<String>,
    /// Tree statistics
    pub stats: TreeStats,
}

/// Statistics gathered while walking the tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Distinct nodes reached from the root
    pub nodes_visited: usize,
    /// Terminal records seen
    pub terminals: usize,
    /// Empty records seen
    pub empty: usize,
    /// Distinct terminal values
    pub distinct_records: usize,
    /// Deepest level at which a record was read
    pub max_depth: u8,
}

impl ValidationReport {
    /// Check if database passed all validations (no errors)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn info(&mut self, msg: impl Into<String>) {
        self.info.push(msg.into());
    }
}

impl TreeStats {
    /// Human-readable summary
    pub fn summary(&self) -> String {
        format!(
            "Nodes: {}, Terminals: {} ({} distinct), Empty: {}, Max depth: {}",
            self.nodes_visited, self.terminals, self.distinct_records, self.empty, self.max_depth
        )
    }
}

/// Validate the search tree and terminal records of a loaded buffer
pub fn validate_tree(data: &[u8], header: &DatHeader) -> ValidationReport {
    let mut walker = TreeWalker {
        tree: SearchTree::new(data, header),
        decoder: RecordDecoder::new(data, header),
        header,
        report: ValidationReport::default(),
        seen: HashSet::new(),
        path: HashSet::new(),
        offsets: HashSet::new(),
        suppressed: 0,
    };

    walker.report.info(format!(
        "{}: {}-byte records, {} segments, tree {} bytes, data {} bytes",
        header.edition,
        header.record_length.bytes(),
        header.segment_count,
        header.tree_size,
        header.data_end.saturating_sub(header.tree_size)
    ));

    walker.visit(0, 0);
    walker.finish()
}

struct TreeWalker<'a> {
    tree: SearchTree<'a>,
    decoder: RecordDecoder<'a>,
    header: &'a DatHeader,
    report: ValidationReport,
    /// Nodes already fully checked
    seen: HashSet<u32>,
    /// Nodes on the current root path
    path: HashSet<u32>,
    /// Terminal values already decoded
    offsets: HashSet<u32>,
    suppressed: usize,
}

impl TreeWalker<'_> {
    fn visit(&mut self, node: u32, depth: u8) {
        if !self.path.insert(node) {
            self.fail(format!("cycle at node {} (depth {})", node, depth));
            return;
        }
        if !self.seen.insert(node) {
            // shared subtree, already checked
            self.path.remove(&node);
            return;
        }

        let width = self.header.ip_version.width();
        self.report.stats.max_depth = self.report.stats.max_depth.max(depth + 1);

        for side in 0..2u8 {
            let record = match self.tree.read_record(node, side) {
                Ok(record) => record,
                Err(err) => {
                    self.fail(err.to_string());
                    continue;
                }
            };

            let segments = self.header.segment_count;
            if record == segments {
                self.report.stats.empty += 1;
            } else if record > segments {
                self.report.stats.terminals += 1;
                self.check_terminal(record - segments);
            } else if depth + 1 >= width {
                self.fail(format!(
                    "node {} points to node {} below the last address bit",
                    node, record
                ));
            } else {
                self.visit(record, depth + 1);
            }
        }

        self.path.remove(&node);
    }

    fn check_terminal(&mut self, data_offset: u32) {
        if !self.offsets.insert(data_offset) {
            return;
        }
        let kind = self.header.edition.record_kind();
        if kind == RecordKind::Opaque {
            return;
        }
        if let Err(err) = self.decoder.decode(data_offset, kind) {
            self.fail(err.to_string());
        }
    }

    fn fail(&mut self, msg: String) {
        if self.report.errors.len() < MAX_REPORTED_ERRORS {
            self.report.error(msg);
        } else {
            self.suppressed += 1;
        }
    }

    fn finish(mut self) -> ValidationReport {
        self.report.stats.nodes_visited = self.seen.len();
        self.report.stats.distinct_records = self.offsets.len();

        if self.suppressed > 0 {
            self.report
                .error(format!("{} further errors not shown", self.suppressed));
        }

        if self.header.edition.record_kind() == RecordKind::Opaque {
            self.report.warning(format!(
                "{} records are not decoded, terminal values were not checked",
                self.header.edition
            ));
        }

        // Country style editions pad the tree up to the trailer
        if self.header.edition.fixed_segments().is_none() {
            let total = self.header.tree_size / self.header.record_length.node_bytes();
            let orphaned = total.saturating_sub(self.seen.len());
            if orphaned > 0 {
                self.report.warning(format!(
                    "{} of {} nodes are unreachable from the root",
                    orphaned, total
                ));
            }
        }

        self.report.info(self.report.stats.summary());
        log::debug!(
            "validated {}: {} errors, {} warnings",
            self.header.edition,
            self.report.errors.len(),
            self.report.warnings.len()
        );
        self.report
    }
}
