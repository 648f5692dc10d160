//! Configuration value types.

use crate::region::Geometry;
use serde::Deserialize;
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Default PNG compression level passed to grim.
pub const DEFAULT_PNG_LEVEL: u8 = 6;

/// Default JPEG quality passed to grim.
pub const DEFAULT_JPEG_QUALITY: u8 = 80;

/// Capture strategy selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Full,
    Region,
    LastRegion,
    ActiveWindow,
    Custom(Geometry),
    /// Succeeds without running any external command.
    Test,
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Full => "Full",
            Mode::Region => "Region",
            Mode::LastRegion => "Last Region",
            Mode::ActiveWindow => "Active Window",
            Mode::Custom(_) => "Custom",
            Mode::Test => "Test",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Bitmask of sinks that receive the captured image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SaveMode(u8);

impl SaveMode {
    pub const NONE: SaveMode = SaveMode(0);
    pub const DISK: SaveMode = SaveMode(1 << 0);
    pub const CLIPBOARD: SaveMode = SaveMode(1 << 1);

    pub fn contains(self, other: SaveMode) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    pub fn is_none(self) -> bool {
        self.0 == 0
    }

    pub fn name(self) -> &'static str {
        match (self.contains(Self::DISK), self.contains(Self::CLIPBOARD)) {
            (false, false) => "None",
            (true, false) => "Disk",
            (false, true) => "Clipboard",
            (true, true) => "Disk & Clipboard",
        }
    }
}

impl Default for SaveMode {
    fn default() -> Self {
        SaveMode::DISK | SaveMode::CLIPBOARD
    }
}

impl BitOr for SaveMode {
    type Output = SaveMode;

    fn bitor(self, rhs: SaveMode) -> SaveMode {
        SaveMode(self.0 | rhs.0)
    }
}

impl BitOrAssign for SaveMode {
    fn bitor_assign(&mut self, rhs: SaveMode) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for SaveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Image encoding produced by grim.
///
/// `jpg` is accepted everywhere a type is named but always maps to `jpeg`,
/// the only spelling grim understands.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ImageType {
    #[default]
    Png,
    Ppm,
    #[serde(alias = "jpg")]
    #[value(alias = "jpg")]
    Jpeg,
}

impl ImageType {
    pub const VALID: &'static str = "png, ppm, jpeg, jpg";

    pub fn as_str(self) -> &'static str {
        match self {
            ImageType::Png => "png",
            ImageType::Ppm => "ppm",
            ImageType::Jpeg => "jpeg",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "png" => Some(ImageType::Png),
            "ppm" => Some(ImageType::Ppm),
            "jpeg" | "jpg" => Some(ImageType::Jpeg),
            _ => None,
        }
    }
}

impl fmt::Display for ImageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
