use std::{fs, io, path::Path, thread};

use crate::capture::{
    dependencies::CaptureDependencies,
    grim, sources,
    types::{CaptureError, CaptureResult},
};
use crate::config::{Config, Mode, SaveMode};
use crate::notification;
use crate::process::Output;
use crate::region::{Geometry, RegionStore};

/// Drives one capture: mode dispatch, then the capture tool and each sink in turn.
///
/// Steps run strictly one after another. A failing step aborts the rest, but
/// side effects of earlier steps (a written file) stay in place. The region
/// cache is only updated after every sink succeeded.
pub struct Capturer<'a> {
    config: &'a Config,
    dependencies: CaptureDependencies,
    store: RegionStore,
}

impl<'a> Capturer<'a> {
    pub fn new(config: &'a Config, dependencies: CaptureDependencies) -> Self {
        Self {
            config,
            dependencies,
            store: RegionStore::in_dir(&config.cache_dir),
        }
    }

    pub fn run(&self) -> Result<CaptureResult, CaptureError> {
        let runner = self.dependencies.runner.as_ref();
        let compositor = self.config.compositor;
        log::info!("*Capturing {}*", self.config.mode);

        let (result, remember) = match self.config.mode {
            Mode::Test => {
                log::info!("Test mode, nothing to capture");
                return Ok(CaptureResult {
                    mode: Mode::Test,
                    geometry: None,
                    saved_path: None,
                    copied_to_clipboard: false,
                });
            }
            Mode::Full => {
                let output = match (&self.config.output_name, self.config.all_outputs) {
                    (Some(name), _) => {
                        sources::verify_output(runner, name)?;
                        Some(name.clone())
                    }
                    (None, true) => None,
                    (None, false) => sources::active_output(runner, compositor)?,
                };
                (self.capture(None, output.as_deref())?, false)
            }
            Mode::Region => {
                let geometry = sources::select_region(runner, compositor)?;
                (self.capture(Some(geometry), None)?, true)
            }
            Mode::LastRegion => {
                let geometry = sources::last_region(&self.store)?;
                (self.capture(Some(geometry), None)?, false)
            }
            Mode::ActiveWindow => {
                let geometry = sources::active_window(runner, compositor)?;
                (self.capture(Some(geometry), None)?, true)
            }
            Mode::Custom(geometry) => (self.capture(Some(geometry), None)?, true),
        };

        if remember && let Some(geometry) = &result.geometry {
            self.cache_region(geometry);
        }
        self.notify(&result);
        Ok(result)
    }

    /// Remember `geometry` for `last-region`. Failure is reported, never fatal.
    fn cache_region(&self, geometry: &Geometry) {
        if !self.config.save_region {
            log::debug!("Not caching region {} (--no-save-region)", geometry);
            return;
        }
        match self.store.persist(&geometry.to_string()) {
            Ok(()) => log::debug!("Cached region in {}", self.store.path().display()),
            Err(e) => log::warn!("Failed to cache region: {}", e),
        }
    }

    /// Run grim into the selected sinks, strictly one after another.
    fn capture(
        &self,
        geometry: Option<Geometry>,
        output: Option<&str>,
    ) -> Result<CaptureResult, CaptureError> {
        let runner = self.dependencies.runner.as_ref();
        let save_mode = self.config.save_mode;
        let grim_cmd = grim::capture_command(self.config, geometry.as_ref(), output)?;

        let disk_path = if save_mode.contains(SaveMode::DISK) {
            let path = self
                .config
                .output_path
                .as_ref()
                .ok_or(CaptureError::MissingOutputPath)?;
            self.check_overwrite(path)?;
            Some(path.clone())
        } else {
            None
        };
        let clipboard = save_mode.contains(SaveMode::CLIPBOARD);

        let command = match &disk_path {
            Some(path) => grim::to_file(&grim_cmd, path)?,
            None if clipboard => grim::to_clipboard(&grim_cmd),
            None => grim_cmd,
        };

        if !self.config.wait.is_zero() {
            log::info!("*Waiting for {} seconds...*", self.config.wait.as_secs());
            thread::sleep(self.config.wait);
        }

        runner
            .run(&command, Output::Discard)
            .map_err(CaptureError::CaptureTool)?;

        if let Some(path) = &disk_path {
            log::info!("Screenshot saved: {}", path.display());
            if clipboard {
                runner
                    .run(&grim::clipboard_from_file(path)?, Output::Discard)
                    .map_err(CaptureError::Clipboard)?;
            }
        }

        Ok(CaptureResult {
            mode: self.config.mode,
            geometry,
            saved_path: disk_path,
            copied_to_clipboard: clipboard,
        })
    }

    /// An existing regular file needs confirmation; anything else in the way is an error.
    fn check_overwrite(&self, path: &Path) -> Result<(), CaptureError> {
        let metadata = match fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(source) => {
                return Err(CaptureError::Stat {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        if !metadata.is_file() {
            return Err(CaptureError::NotRegularFile(path.to_path_buf()));
        }

        let confirmed = self
            .dependencies
            .confirm
            .confirm(path)
            .map_err(CaptureError::Confirm)?;
        if !confirmed {
            return Err(CaptureError::OverwriteDeclined(path.to_path_buf()));
        }
        Ok(())
    }

    fn notify(&self, result: &CaptureResult) {
        if !self.config.notify {
            return;
        }
        let Some(destination) = result.destination() else {
            return;
        };
        notification::send_best_effort(
            self.dependencies.notifier.as_ref(),
            &format!("Screenshot taken ({})", result.mode),
            &format!("Saved to {}", destination),
        );
    }
}
