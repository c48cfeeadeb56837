//! Open configuration
//!
//! The candidate path list and load mode are configuration supplied by the
//! caller or the environment. When no path is configured the built-in
//! [`DEFAULT_PATHS`] are tried.

use crate::database::Database;
use crate::error::Result;
use std::env;
use std::path::PathBuf;

/// Environment variable holding a platform path list of candidates
pub const PATH_ENV: &str = "GEODAT_PATH";

/// Locations where distributions install the country database
pub const DEFAULT_PATHS: &[&str] = &[
    "/usr/share/GeoIP/GeoIP.dat",
    "/usr/share/local/GeoIP/GeoIP.dat",
    "/usr/local/share/GeoIP/GeoIP.dat",
    "/opt/local/share/GeoIP/GeoIP.dat",
];

/// How the database file is brought into memory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadMode {
    /// Read the whole file into an owned buffer
    #[default]
    Memory,
    /// Memory-map the file
    Mmap,
}

/// Options for opening a database
///
/// Created via [`Database::options`]. Use the fluent API to configure
/// candidates and load mode, then call `.open()`.
///
/// # Examples
///
/// ```no_run
/// use geodat::Database;
///
/// let db = Database::options()
///     .path("/var/lib/GeoIP/GeoIPASNum.dat")
///     .path("/usr/share/GeoIP/GeoIPASNum.dat")
///     .mmap()
///     .open()?;
/// # Ok::<(), geodat::GeoIpError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct OpenOptions {
    paths: Vec<PathBuf>,
    mode: LoadMode,
}

impl OpenOptions {
    /// Empty options: default paths, in-memory load
    pub fn new() -> Self {
        Self::default()
    }

    /// Options seeded from the `GEODAT_PATH` environment variable
    ///
    /// An unset or empty variable leaves the candidate list empty, which
    /// falls back to [`DEFAULT_PATHS`] at open time.
    pub fn from_env() -> Self {
        let paths = env::var_os(PATH_ENV)
            .map(|value| env::split_paths(&value).filter(|p| !p.as_os_str().is_empty()).collect())
            .unwrap_or_default();
        Self {
            paths,
            mode: LoadMode::default(),
        }
    }

    /// Append one candidate path
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.paths.push(path.into());
        self
    }

    /// Append several candidate paths
    pub fn paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.paths.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Set the load mode
    pub fn mode(mut self, mode: LoadMode) -> Self {
        self.mode = mode;
        self
    }

    /// Memory-map the database instead of reading it
    pub fn mmap(self) -> Self {
        self.mode(LoadMode::Mmap)
    }

    /// Configured load mode
    pub fn load_mode(&self) -> LoadMode {
        self.mode
    }

    /// Candidates in the order they will be tried
    pub fn candidates(&self) -> Vec<PathBuf> {
        if self.paths.is_empty() {
            DEFAULT_PATHS.iter().map(PathBuf::from).collect()
        } else {
            self.paths.clone()
        }
    }

    /// Open the first valid candidate
    pub fn open(&self) -> Result<Database> {
        Database::open_with_options(self)
    }
}
