//! Database buffer storage
//!
//! A loaded database is a single immutable byte buffer, either read fully
//! into memory or memory-mapped. Files ending in `.gz` are always
//! decompressed into memory.
//!
//! # Example
//!
//! ```no_run
//! use geodat::storage::Storage;
//! use geodat::LoadMode;
//!
//! let storage = Storage::load("/usr/share/GeoIP/GeoIP.dat", LoadMode::Mmap)?;
//! println!("Size: {} bytes", storage.len());
//! # Ok::<(), std::io::Error>(())
//! ```

use crate::options::LoadMode;
use flate2::read::GzDecoder;
use memmap2::Mmap;
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Buffer size for gzip decompression (128KB)
const BUFFER_SIZE: usize = 128 * 1024;

/// Storage for database data - either owned or memory-mapped
///
/// The mapping or allocation is released when the `Storage` is dropped.
pub enum Storage {
    /// Whole file read into memory
    Owned(Vec<u8>),
    /// Memory-mapped file
    Mmap(Mmap),
}

impl Storage {
    /// Load a database file with the given mode
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be opened or read
    /// - The file cannot be mapped
    /// - The file is a `.gz` file with invalid gzip data
    pub fn load<P: AsRef<Path>>(path: P, mode: LoadMode) -> io::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;

        if is_gzip(path) {
            let mut data = Vec::new();
            GzDecoder::new(BufReader::with_capacity(BUFFER_SIZE, file)).read_to_end(&mut data)?;
            return Ok(Storage::Owned(data));
        }

        match mode {
            LoadMode::Memory => {
                let mut data = Vec::new();
                BufReader::with_capacity(BUFFER_SIZE, file).read_to_end(&mut data)?;
                Ok(Storage::Owned(data))
            }
            LoadMode::Mmap => {
                // SAFETY: the mapping is read-only and the buffer is never
                // handed out beyond the lifetime of `Storage`
                let mmap = unsafe { Mmap::map(&file)? };
                Ok(Storage::Mmap(mmap))
            }
        }
    }

    /// Get a slice of the entire buffer
    pub fn as_slice(&self) -> &[u8] {
        match self {
            Storage::Owned(v) => v.as_slice(),
            Storage::Mmap(m) => &m[..],
        }
    }

    /// Size of the buffer in bytes
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Whether the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the buffer is a memory mapping
    pub fn is_mmap(&self) -> bool {
        matches!(self, Storage::Mmap(_))
    }
}

impl fmt::Debug for Storage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Storage")
            .field("size", &self.len())
            .field("mmap", &self.is_mmap())
            .finish()
    }
}

fn is_gzip(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false)
}
