//! Data types for screenshot capture.

use crate::compositor::Compositor;
use crate::config::Mode;
use crate::process::ProcessError;
use crate::region::{Geometry, RegionError};
use std::path::PathBuf;
use thiserror::Error;

/// What a finished capture delivered.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureResult {
    pub mode: Mode,
    /// Area that was captured; `None` for full-output captures.
    pub geometry: Option<Geometry>,
    /// Path where the image was saved (if saved).
    pub saved_path: Option<PathBuf>,
    /// Whether the image was copied to the clipboard.
    pub copied_to_clipboard: bool,
}

impl CaptureResult {
    /// Human readable list of sinks, e.g. `/tmp/a.png and clipboard`.
    pub fn destination(&self) -> Option<String> {
        match (&self.saved_path, self.copied_to_clipboard) {
            (Some(path), true) => Some(format!("{} and clipboard", path.display())),
            (Some(path), false) => Some(path.display().to_string()),
            (None, true) => Some("clipboard".to_string()),
            (None, false) => None,
        }
    }
}

/// Errors that can occur during screenshot capture.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Selection cancelled")]
    SelectionCancelled,

    #[error("Failed to run the region selector: {0}")]
    Selector(#[source] ProcessError),

    #[error("Your compositor is not supported: mode `{mode}` is unavailable")]
    Unsupported {
        mode: &'static str,
        compositor: Compositor,
    },

    #[error("Failed to get information about window position: {0}")]
    WindowQuery(#[source] ProcessError),

    #[error("Failed to get information about window position: got `{0}`")]
    WindowGeometry(String),

    #[error("Failed to get information about current monitor: {0}")]
    OutputQuery(#[source] ProcessError),

    #[error("Unknown output `{name}`")]
    UnknownOutput {
        name: String,
        #[source]
        source: ProcessError,
    },

    #[error("No region saved yet in {}; run region mode first (`gripper region`)", path.display())]
    NoLastRegion { path: PathBuf },

    #[error(transparent)]
    Region(#[from] RegionError),

    #[error("{} already exists and it is not a regular file", .0.display())]
    NotRegularFile(PathBuf),

    #[error("No output path resolved for saving to disk")]
    MissingOutputPath,

    #[error("Not overwriting {}", .0.display())]
    OverwriteDeclined(PathBuf),

    #[error("Failed to read input: {0}")]
    Confirm(#[source] std::io::Error),

    #[error("Failed to stat {}: {source}", path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to run grim: {0}")]
    CaptureTool(#[source] ProcessError),

    #[error("Failed to copy the screenshot to the clipboard: {0}")]
    Clipboard(#[source] ProcessError),

    #[error(transparent)]
    Command(#[from] ProcessError),
}
