//! Command lines for grim, slurp and wl-copy.

use crate::config::{Config, DEFAULT_JPEG_QUALITY, DEFAULT_PNG_LEVEL, ImageType};
use crate::process::{ProcessError, quote, quote_path};
use crate::region::Geometry;
use std::path::Path;

pub const SLURP_BG_COLOUR: &str = "#101020aa";
pub const SLURP_BORDER_COLOUR: &str = "#cdd6f4aa";
pub const SLURP_OPTION_BOX_COLOUR: &str = "#31324450";
pub const SLURP_SELECTION_COLOUR: &str = "#00000000";

/// grim invocation writing the image to stdout.
///
/// `output` is only honored when no geometry is given.
pub fn capture_command(
    config: &Config,
    geometry: Option<&Geometry>,
    output: Option<&str>,
) -> Result<String, ProcessError> {
    let mut cmd = format!("grim -t {}", config.image_type.as_str());

    if (config.scale - 1.0).abs() > f64::EPSILON {
        cmd.push_str(&format!(" -s {}", config.scale));
    }

    if config.png_level != DEFAULT_PNG_LEVEL || config.jpeg_quality != DEFAULT_JPEG_QUALITY {
        match config.image_type {
            ImageType::Png => cmd.push_str(&format!(" -l {}", config.png_level)),
            ImageType::Jpeg => cmd.push_str(&format!(" -q {}", config.jpeg_quality)),
            ImageType::Ppm => {}
        }
    }

    if config.cursor {
        cmd.push_str(" -c");
    }

    match (geometry, output) {
        (Some(geometry), _) => cmd.push_str(&format!(" -g \"{}\"", geometry)),
        (None, Some(output)) => cmd.push_str(&format!(" -o {}", quote(output)?)),
        (None, None) => {}
    }

    cmd.push_str(" -");
    Ok(cmd)
}

/// Cheap capture of `output` to the null sink, used to check that the output exists.
pub fn output_check_command(output: &str) -> Result<String, ProcessError> {
    Ok(format!("grim -t jpeg -q 0 -o {} -", quote(output)?))
}

/// Interactive selector, fed window geometries on stdin when available.
pub fn selector_command(windows: Option<&str>) -> String {
    let slurp = format!(
        "slurp -d -b '{}' -c '{}' -B '{}' -s '{}'",
        SLURP_BG_COLOUR, SLURP_BORDER_COLOUR, SLURP_OPTION_BOX_COLOUR, SLURP_SELECTION_COLOUR
    );
    match windows {
        Some(windows) => format!("{} | {}", windows, slurp),
        None => slurp,
    }
}

/// Redirect the capture into `path`.
pub fn to_file(capture: &str, path: &Path) -> Result<String, ProcessError> {
    Ok(format!("{} > {}", capture, quote_path(path)?))
}

/// Pipe the capture straight into the clipboard.
pub fn to_clipboard(capture: &str) -> String {
    format!("{} | wl-copy", capture)
}

/// Copy an already written image into the clipboard.
pub fn clipboard_from_file(path: &Path) -> Result<String, ProcessError> {
    Ok(format!("wl-copy < {}", quote_path(path)?))
}
