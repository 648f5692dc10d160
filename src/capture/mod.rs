//! Screenshot capture for gripper.
//!
//! This module drives the capture modes:
//! - Full screen (one output or all of them)
//! - Region selected with slurp, and the last selected region
//! - Active window, queried from the compositor
//! - Custom region given on the command line
//!
//! The image itself never passes through this process: grim writes it to a
//! file or pipes it to wl-copy.

pub mod confirm;
pub mod dependencies;
pub mod grim;
pub mod types;

mod pipeline;
mod sources;

pub use confirm::{AlwaysConfirm, NeverConfirm, OverwriteConfirm, StdinConfirm};
pub use dependencies::CaptureDependencies;
pub use pipeline::Capturer;
pub use types::{CaptureError, CaptureResult};
