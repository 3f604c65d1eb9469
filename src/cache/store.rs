//! On-disk storage for the quote bundle
//!
//! The bundle lives in a single JSON file, `output/zen_quotes.json` under the
//! application root (the directory holding the executable). The file is
//! rewritten in full on every save.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use log::warn;
use serde::Serialize;
use thiserror::Error;

use crate::data::QuoteBundle;

/// Directory under the application root holding the cache file
const OUTPUT_DIR: &str = "output";

/// Cache file name
const OUTPUT_FILE: &str = "zen_quotes.json";

/// Errors that can occur when reading or writing the cache file
#[derive(Debug, Error)]
pub enum StoreError {
    /// The cache file does not exist
    #[error("Output file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The file exists but is not a valid bundle
    #[error("Error parsing output file {}: {reason}", path.display())]
    InvalidContent { path: PathBuf, reason: String },

    /// The file exists but could not be read
    #[error("Failed to read output file {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    /// Directory creation or file write failed
    #[error("Failed to write output file {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Persistence seam for the cache manager
pub trait BundleStore {
    /// Reads the stored bundle
    fn load(&self) -> Result<QuoteBundle, StoreError>;

    /// Replaces the stored bundle
    fn save(&self, bundle: &QuoteBundle) -> Result<(), StoreError>;
}

impl<T: BundleStore + ?Sized> BundleStore for &T {
    fn load(&self) -> Result<QuoteBundle, StoreError> {
        (**self).load()
    }

    fn save(&self, bundle: &QuoteBundle) -> Result<(), StoreError> {
        (**self).save(bundle)
    }
}

/// Returns the application root: the directory containing the executable,
/// or the per-user data directory when that cannot be determined
pub fn app_root() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .or_else(|| {
            ProjectDirs::from("", "", "zenquotes").map(|dirs| dirs.data_dir().to_path_buf())
        })
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Default location of the cache file
pub fn default_cache_file() -> PathBuf {
    app_root().join(OUTPUT_DIR).join(OUTPUT_FILE)
}

/// JSON file store for the quote bundle
#[derive(Debug, Clone)]
pub struct QuoteStore {
    path: PathBuf,
}

impl QuoteStore {
    /// Creates a store backed by a specific file
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the cache file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensures the directory holding the cache file exists
    fn ensure_dir(&self) -> io::Result<()> {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir),
            _ => Ok(()),
        }
    }

    fn invalid_content(&self, reason: impl ToString) -> StoreError {
        warn!("Error parsing output file: {}", self.path.display());
        StoreError::InvalidContent {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }
}

impl BundleStore for QuoteStore {
    fn load(&self) -> Result<QuoteBundle, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!("Output file not found: {}", self.path.display());
                return Err(StoreError::NotFound {
                    path: self.path.clone(),
                });
            }
            // Not UTF-8
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                return Err(self.invalid_content(e));
            }
            Err(source) => {
                warn!("Failed to read output file: {}", self.path.display());
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_str(&content).map_err(|e| self.invalid_content(e))
    }

    fn save(&self, bundle: &QuoteBundle) -> Result<(), StoreError> {
        let write_error = |source: io::Error| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        self.ensure_dir().map_err(write_error)?;

        let mut json = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut json, formatter);
        bundle
            .serialize(&mut serializer)
            .map_err(|e| write_error(io::Error::new(io::ErrorKind::InvalidData, e)))?;

        fs::write(&self.path, json).map_err(write_error)
    }
}
