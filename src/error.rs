//! Error types for the geodat library
use std::fmt;
use std::path::PathBuf;

use crate::dat::Edition;

/// Result type alias for geodat operations
pub type Result<T> = std::result::Result<T, GeoIpError>;

/// Main error type for opening and querying legacy GeoIP databases
#[derive(Debug, thiserror::Error)]
pub enum GeoIpError {
    /// None of the candidate paths exists
    #[error("no GeoIP database found (tried: {})", display_paths(.candidates))]
    NotFound {
        /// Paths that were tried, in order
        candidates: Vec<PathBuf>,
    },

    /// At least one candidate existed but none could be loaded
    #[error("error opening GeoIP database: {}", display_failures(.failures))]
    Open {
        /// One entry per existing candidate that failed
        failures: Vec<CandidateFailure>,
    },

    /// Trailer or structural parameters are invalid
    #[error("corrupt database header: {0}")]
    CorruptHeader(String),

    /// Address text could not be parsed for the requested family
    #[error("invalid address: {0:?}")]
    InvalidAddress(String),

    /// Tree traversal left the buffer or exceeded the address width
    #[error("corrupt search tree: {0}")]
    CorruptTree(String),

    /// Terminal record could not be decoded
    #[error("record decode error: {0}")]
    Decode(String),

    /// The database edition cannot serve the requested lookup
    #[error("{operation} is not supported by {edition} databases")]
    UnsupportedEdition {
        /// Edition of the opened database
        edition: Edition,
        /// Name of the rejected operation
        operation: &'static str,
    },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why a single existing candidate path was rejected
#[derive(Debug)]
pub struct CandidateFailure {
    /// Candidate path
    pub path: PathBuf,
    /// Underlying error
    pub error: Box<GeoIpError>,
}

impl fmt::Display for CandidateFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.error)
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn display_failures(failures: &[CandidateFailure]) -> String {
    failures
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
