//! Where capture geometry (or the output to capture) comes from.

use crate::capture::grim;
use crate::capture::types::CaptureError;
use crate::compositor::Compositor;
use crate::process::{self, CommandRunner, Output};
use crate::region::{Geometry, RegionError, RegionStore};

/// Let the user draw a region with slurp.
///
/// A nonzero exit from the selector means the user aborted the selection.
pub fn select_region(
    runner: &dyn CommandRunner,
    compositor: Compositor,
) -> Result<Geometry, CaptureError> {
    let windows = compositor.windows_cmd();
    if windows.is_some() {
        log::info!("Snap selection to windows is enabled");
    } else {
        log::info!("Snap selection to windows is disabled");
    }

    let output = match runner.run(&grim::selector_command(windows), Output::Capture) {
        Ok(output) => output,
        Err(e) if e.is_exit() => return Err(CaptureError::SelectionCancelled),
        Err(e) => return Err(CaptureError::Selector(e)),
    };

    let region = process::output_text(output);
    log::info!("Selected region: {}", region);
    Ok(region.parse::<Geometry>()?)
}

/// Geometry cached by the previous region-yielding capture.
pub fn last_region(store: &RegionStore) -> Result<Geometry, CaptureError> {
    let region = store.retrieve().map_err(|e| match e {
        RegionError::NotFound { path } => CaptureError::NoLastRegion { path },
        other => CaptureError::Region(other),
    })?;
    log::info!("Selected region: {}", region);
    Ok(region.parse::<Geometry>()?)
}

/// Geometry of the focused window. Fails fast on unsupported compositors.
pub fn active_window(
    runner: &dyn CommandRunner,
    compositor: Compositor,
) -> Result<Geometry, CaptureError> {
    let command = compositor
        .active_window_cmd()
        .ok_or(CaptureError::Unsupported {
            mode: "active-window",
            compositor,
        })?;

    let output = runner
        .run(command, Output::Capture)
        .map_err(CaptureError::WindowQuery)?;

    // Without a focused window the query prints `null,null nullxnull`.
    let region = process::output_text(output);
    region
        .parse()
        .map_err(|_| CaptureError::WindowGeometry(region.clone()))
}

/// Name of the focused output, or `None` to capture every output.
pub fn active_output(
    runner: &dyn CommandRunner,
    compositor: Compositor,
) -> Result<Option<String>, CaptureError> {
    let Some(command) = compositor.active_output_cmd() else {
        log::info!("Compositor not supported, capturing all outputs");
        return Ok(None);
    };

    let output = runner
        .run(command, Output::Capture)
        .map_err(CaptureError::OutputQuery)?;
    let name = process::output_text(output);
    if name.is_empty() {
        log::warn!("Compositor reported no focused output, capturing all outputs");
        return Ok(None);
    }
    Ok(Some(name))
}

/// Make sure grim knows the output the user asked for.
pub fn verify_output(runner: &dyn CommandRunner, name: &str) -> Result<(), CaptureError> {
    runner
        .run(&grim::output_check_command(name)?, Output::Discard)
        .map_err(|source| CaptureError::UnknownOutput {
            name: name.to_string(),
            source,
        })?;
    Ok(())
}
