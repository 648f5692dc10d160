//! Capture geometry and the single-slot cache of the last captured region.

use std::fmt;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Name of the cache file holding the last region.
pub const LAST_REGION_FILE: &str = "gripper-last-region";

/// Upper bound on bytes read back from the cache file.
pub const MAX_REGION_BYTES: u64 = 1024;

#[derive(Debug, Error)]
pub enum RegionError {
    #[error("no region saved yet at {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid region format `{0}` (expected 'X,Y WxH')")]
    InvalidGeometry(String),
}

/// Rectangle in the `X,Y WxH` notation understood by grim and slurp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl FromStr for Geometry {
    type Err = RegionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RegionError::InvalidGeometry(s.to_string());

        let (position, size) = s.trim().split_once(' ').ok_or_else(invalid)?;
        let (x, y) = position.split_once(',').ok_or_else(invalid)?;
        let (width, height) = size.split_once('x').ok_or_else(invalid)?;

        Ok(Geometry {
            x: x.parse().map_err(|_| invalid())?,
            y: y.parse().map_err(|_| invalid())?,
            width: width.parse().map_err(|_| invalid())?,
            height: height.parse().map_err(|_| invalid())?,
        })
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{} {}x{}", self.x, self.y, self.width, self.height)
    }
}

/// Persists the last used geometry. Last write wins; there is no history and no locking.
#[derive(Debug, Clone)]
pub struct RegionStore {
    path: PathBuf,
}

impl RegionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store inside `cache_dir` under [`LAST_REGION_FILE`].
    pub fn in_dir(cache_dir: &Path) -> Self {
        Self::new(cache_dir.join(LAST_REGION_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the cache with `geometry`, terminated by exactly one newline.
    ///
    /// The trailing newline is normalized because editors tend to append one
    /// when the file is touched by hand.
    pub fn persist(&self, geometry: &str) -> Result<(), RegionError> {
        let io_err = |source| RegionError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            log::info!("Creating cache directory: {}", parent.display());
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let mut contents = geometry.trim_end_matches(['\n', '\r']).to_string();
        contents.push('\n');

        let mut file = File::create(&self.path).map_err(io_err)?;
        file.write_all(contents.as_bytes()).map_err(io_err)?;

        log::debug!("Cached region {} in {}", contents.trim_end(), self.path.display());
        Ok(())
    }

    /// Read the stored geometry without its trailing newline.
    pub fn retrieve(&self) -> Result<String, RegionError> {
        let file = File::open(&self.path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                RegionError::NotFound {
                    path: self.path.clone(),
                }
            } else {
                RegionError::Io {
                    path: self.path.clone(),
                    source,
                }
            }
        })?;

        let mut contents = String::new();
        file.take(MAX_REGION_BYTES)
            .read_to_string(&mut contents)
            .map_err(|source| RegionError::Io {
                path: self.path.clone(),
                source,
            })?;

        Ok(contents.trim_end_matches(['\n', '\r']).to_string())
    }
}
