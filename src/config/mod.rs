//! Runtime configuration for a single gripper invocation.
//!
//! A [`Config`] is assembled once from built-in defaults, the optional
//! `~/.config/gripper/config.toml`, the environment, and the command line
//! (in increasing order of precedence). It is read-only afterwards and passed
//! by reference to every component.

pub mod env;
pub mod file;
pub mod types;

pub use env::Environment;
pub use file::FileConfig;
pub use types::{DEFAULT_JPEG_QUALITY, DEFAULT_PNG_LEVEL, ImageType, Mode, SaveMode};

use crate::cli::{CaptureArgs, ModeCommand};
use crate::compositor::Compositor;
use crate::output::{self, NameError};
use chrono::{Datelike, Timelike};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("HOME is not set")]
    MissingHome,

    #[error("-f: directory \"{}\" does not exist", .0.display())]
    MissingParentDir(PathBuf),

    #[error("-f: unspecified file extension, add one of: {}", ImageType::VALID)]
    MissingExtension,

    #[error("-f: invalid file extension `{ext}`, valid types: {}", ImageType::VALID)]
    InvalidExtension { ext: String },

    #[error("failed to create directory \"{}\": {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("\"{}\" already exists but it is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("-d: screenshot directory is empty")]
    EmptyDirectory,

    #[error("output path {} is not valid UTF-8", .0.display())]
    NonUtf8Path(PathBuf),

    #[error("failed to read config from {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config from {}: {source}", path.display())]
    ParseFile {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("--format: {0}")]
    Format(#[from] NameError),
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,
    pub compositor: Compositor,
    pub save_mode: SaveMode,
    pub image_type: ImageType,
    pub png_level: u8,
    pub jpeg_quality: u8,
    pub scale: f64,
    pub cursor: bool,
    pub wait: Duration,
    pub screenshot_dir: PathBuf,
    pub cache_dir: PathBuf,
    /// Output (monitor) explicitly requested with `-o`.
    pub output_name: Option<String>,
    pub all_outputs: bool,
    /// Destination on disk; `None` unless the disk sink is selected.
    pub output_path: Option<PathBuf>,
    pub output_format: String,
    pub verbose: bool,
    pub save_region: bool,
    pub notify: bool,
}

impl Config {
    /// Defaults for `mode` rooted at the given directories. Used as the base of
    /// [`Config::resolve`] and by tests that need an isolated instance.
    pub fn with_defaults(mode: Mode, screenshot_dir: PathBuf, cache_dir: PathBuf) -> Self {
        let file = FileConfig::default();
        Self {
            mode,
            compositor: Compositor::Unsupported,
            save_mode: SaveMode::default(),
            image_type: file.image_type,
            png_level: file.png_level,
            jpeg_quality: file.jpeg_quality,
            scale: 1.0,
            cursor: file.cursor,
            wait: Duration::ZERO,
            screenshot_dir,
            cache_dir,
            output_name: None,
            all_outputs: false,
            output_path: None,
            output_format: file.format,
            verbose: false,
            save_region: file.save_region,
            notify: file.notify,
        }
    }

    /// Merge every configuration source and prepare the screenshot directory.
    ///
    /// `now` is the timestamp used to expand the output format.
    pub fn resolve<T>(
        mode: &ModeCommand,
        args: &CaptureArgs,
        env: &Environment,
        file: &FileConfig,
        now: &T,
    ) -> Result<Self, ConfigError>
    where
        T: Datelike + Timelike,
    {
        let mode = match mode {
            ModeCommand::Full => Mode::Full,
            ModeCommand::Region => Mode::Region,
            ModeCommand::LastRegion => Mode::LastRegion,
            ModeCommand::ActiveWindow => Mode::ActiveWindow,
            ModeCommand::Custom { geometry } => Mode::Custom(*geometry),
            ModeCommand::Test => Mode::Test,
        };

        let screenshot_dir = args
            .dir
            .clone()
            .or_else(|| env.screenshot_dir.clone())
            .or_else(|| file.screenshot_dir(&env.home))
            .unwrap_or_else(|| env.default_screenshot_dir());

        let mut config = Self::with_defaults(mode, screenshot_dir, env.cache_dir());
        config.compositor = env.compositor();
        config.image_type = args.image_type.unwrap_or(file.image_type);
        config.png_level = args.png_level.unwrap_or(file.png_level);
        config.jpeg_quality = args.jpeg_quality.unwrap_or(file.jpeg_quality);
        config.scale = args.scale.unwrap_or(1.0);
        config.cursor = args.cursor || file.cursor;
        config.wait = Duration::from_secs(args.wait.unwrap_or(0));
        config.output_name = args.output.clone();
        config.all_outputs = args.all;
        config.output_format = args.format.clone().unwrap_or_else(|| file.format.clone());
        config.verbose = args.verbose;
        config.save_region = file.save_region && !args.no_save_region;
        config.notify = file.notify;
        config.save_mode = save_mode_from_flags(args);

        if !matches!(config.mode, Mode::Full) && (config.output_name.is_some() || config.all_outputs)
        {
            log::warn!("Flag -o and --all is ignored outside of mode `full`");
        }

        if config.screenshot_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyDirectory);
        }

        if let Some(path) = &args.file {
            config.image_type = validate_output_file(path)?;
            config.output_path = Some(path.clone());
        }

        if config.output_path.is_none() && config.save_mode.contains(SaveMode::DISK) {
            config.output_path = Some(output::output_path(
                &config.screenshot_dir,
                &config.output_format,
                now,
                config.image_type.as_str(),
            )?);
        }

        if let Some(path) = &config.output_path
            && path.to_str().is_none()
        {
            return Err(ConfigError::NonUtf8Path(path.clone()));
        }

        // Nothing above touches the filesystem.
        ensure_directory(&config.screenshot_dir)?;

        Ok(config)
    }

    /// Log the effective settings when running with `--verbose`.
    pub fn log_summary(&self) {
        if !self.verbose {
            return;
        }
        log::info!("====================");
        if matches!(self.mode, Mode::Full) {
            log::info!(
                "Output                  : {}",
                self.output_name.as_deref().unwrap_or("All")
            );
        }
        if let Mode::Custom(geometry) = self.mode {
            log::info!("Region                  : {}", geometry);
        }
        log::info!(
            "Screenshot directory    : {}",
            self.screenshot_dir.display()
        );
        if let Some(path) = &self.output_path {
            log::info!("Output path             : {}", path.display());
        }
        log::info!("Cache directory         : {}", self.cache_dir.display());
        log::info!("Compositor              : {}", self.compositor);
        log::info!("Mode                    : {}", self.mode);
        log::info!(
            "Cursor                  : {}",
            if self.cursor { "Shown" } else { "Hidden" }
        );
        log::info!("Save to                 : {}", self.save_mode);
        log::info!("Scale                   : {:.1}", self.scale);
        log::info!("Image type              : {}", self.image_type);
        match self.image_type {
            ImageType::Png => log::info!("PNG compression level   : {}", self.png_level),
            ImageType::Jpeg => log::info!("JPEG quality            : {}", self.jpeg_quality),
            ImageType::Ppm => {}
        }
        log::info!("====================");
    }
}

/// `--save` and `--copy` select sinks (both when neither is given); `--no-save` wins.
fn save_mode_from_flags(args: &CaptureArgs) -> SaveMode {
    if args.no_save {
        return SaveMode::NONE;
    }
    let mut mode = SaveMode::NONE;
    if args.save {
        mode |= SaveMode::DISK;
    }
    if args.copy {
        mode |= SaveMode::CLIPBOARD;
    }
    if mode.is_none() {
        SaveMode::default()
    } else {
        mode
    }
}

/// Check a literal `-f` path and return the image type its extension names.
fn validate_output_file(path: &Path) -> Result<ImageType, ConfigError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.is_dir()
    {
        if parent.exists() {
            return Err(ConfigError::NotADirectory(parent.to_path_buf()));
        }
        return Err(ConfigError::MissingParentDir(parent.to_path_buf()));
    }

    match path.extension().and_then(|ext| ext.to_str()) {
        None | Some("") => Err(ConfigError::MissingExtension),
        Some(ext) => ImageType::from_extension(ext).ok_or_else(|| ConfigError::InvalidExtension {
            ext: ext.to_string(),
        }),
    }
}

/// Create `directory` if it does not exist yet.
pub fn ensure_directory(directory: &Path) -> Result<(), ConfigError> {
    if directory.as_os_str().is_empty() {
        return Err(ConfigError::EmptyDirectory);
    }
    match fs::metadata(directory) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(ConfigError::NotADirectory(directory.to_path_buf())),
        Err(_) => {
            fs::create_dir_all(directory).map_err(|source| ConfigError::CreateDir {
                path: directory.to_path_buf(),
                source,
            })?;
            log::info!("Created \"{}\"", directory.display());
            Ok(())
        }
    }
}
