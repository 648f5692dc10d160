//! Optional defaults file at `~/.config/gripper/config.toml`.
//!
//! # Example TOML
//! ```toml
//! screenshot_dir = "~/Pictures/Screenshots"
//! format = "Screenshot_%Y%M%d_%h%m%s"
//! image_type = "png"
//! png_level = 6
//! jpeg_quality = 80
//! cursor = false
//! save_region = true
//! notify = true
//! ```
//!
//! Command-line flags and `SCREENSHOT_DIR` override anything set here.

use super::ConfigError;
use super::types::{DEFAULT_JPEG_QUALITY, DEFAULT_PNG_LEVEL, ImageType};
use log::{debug, info};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default output file name template.
pub const DEFAULT_FORMAT: &str = "Screenshot_%Y%M%d_%h%m%s";

#[derive(Debug, Clone, Deserialize)]
pub struct FileConfig {
    /// Where screenshots are written (supports `~/`)
    #[serde(default)]
    pub screenshot_dir: Option<String>,

    /// Output file name template, see `gripper --help`
    #[serde(default = "default_format")]
    pub format: String,

    /// Image type: png, ppm, or jpeg
    #[serde(default)]
    pub image_type: ImageType,

    /// PNG compression level (valid range: 0 - 9)
    #[serde(default = "default_png_level")]
    pub png_level: u8,

    /// JPEG quality (valid range: 0 - 100)
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,

    /// Include the cursor in screenshots
    #[serde(default)]
    pub cursor: bool,

    /// Remember the captured region for `last-region`
    #[serde(default = "default_true")]
    pub save_region: bool,

    /// Send a desktop notification after saving
    #[serde(default = "default_true")]
    pub notify: bool,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            screenshot_dir: None,
            format: default_format(),
            image_type: ImageType::default(),
            png_level: default_png_level(),
            jpeg_quality: default_jpeg_quality(),
            cursor: false,
            save_region: default_true(),
            notify: default_true(),
        }
    }
}

fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}

fn default_png_level() -> u8 {
    DEFAULT_PNG_LEVEL
}

fn default_jpeg_quality() -> u8 {
    DEFAULT_JPEG_QUALITY
}

fn default_true() -> bool {
    true
}

impl FileConfig {
    /// Load `path`, or defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!("Config file not found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config: FileConfig =
            toml::from_str(&contents).map_err(|source| ConfigError::ParseFile {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate_and_clamp();

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);
        Ok(config)
    }

    fn validate_and_clamp(&mut self) {
        if self.png_level > 9 {
            log::warn!(
                "Invalid png_level {}, clamping to 0-9 range",
                self.png_level
            );
            self.png_level = 9;
        }

        if self.jpeg_quality > 100 {
            log::warn!(
                "Invalid jpeg_quality {}, clamping to 0-100 range",
                self.jpeg_quality
            );
            self.jpeg_quality = 100;
        }

        if self.format.is_empty() {
            log::warn!("Empty format, falling back to '{}'", DEFAULT_FORMAT);
            self.format = default_format();
        }
    }

    /// Configured screenshot directory with `~/` expanded against `home`.
    pub fn screenshot_dir(&self, home: &Path) -> Option<PathBuf> {
        self.screenshot_dir
            .as_deref()
            .map(|dir| expand_tilde(dir, home))
    }
}

/// Expand a leading `~/` against `home`.
pub fn expand_tilde(path: &str, home: &Path) -> PathBuf {
    if path == "~" {
        return home.to_path_buf();
    }
    if let Some(stripped) = path.strip_prefix("~/") {
        return home.join(stripped);
    }
    PathBuf::from(path)
}
