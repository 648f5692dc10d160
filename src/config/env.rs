//! Environment variables read once at startup.

use super::ConfigError;
use crate::compositor::Compositor;
use std::ffi::OsString;
use std::path::PathBuf;

/// Default screenshot directory relative to `$HOME`.
pub const DEFAULT_SCREENSHOT_DIR: &str = "Pictures/Screenshots";

/// Snapshot of the environment inputs gripper cares about.
#[derive(Debug, Clone)]
pub struct Environment {
    pub home: PathBuf,
    pub screenshot_dir: Option<PathBuf>,
    pub cache_home: Option<PathBuf>,
    pub config_home: Option<PathBuf>,
    pub desktop: Option<String>,
}

impl Environment {
    /// Read from the process environment.
    pub fn from_process() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var_os(key))
    }

    /// Build from an arbitrary lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let get = |key: &str| non_empty(&lookup, key);

        let home = get("HOME")
            .map(PathBuf::from)
            .ok_or(ConfigError::MissingHome)?;

        Ok(Self {
            home,
            screenshot_dir: get("SCREENSHOT_DIR").map(PathBuf::from),
            cache_home: get("XDG_CACHE_HOME").map(PathBuf::from),
            config_home: get("XDG_CONFIG_HOME").map(PathBuf::from),
            desktop: desktop(&lookup),
        })
    }

    /// Detect the compositor alone. Unlike a full snapshot this needs no `HOME`.
    pub fn compositor_from_lookup<F>(lookup: F) -> Compositor
    where
        F: Fn(&str) -> Option<OsString>,
    {
        Compositor::detect(desktop(&lookup).as_deref())
    }

    pub fn compositor_from_process() -> Compositor {
        Self::compositor_from_lookup(|key| std::env::var_os(key))
    }

    pub fn compositor(&self) -> Compositor {
        Compositor::detect(self.desktop.as_deref())
    }

    /// `$XDG_CACHE_HOME`, falling back to `$HOME/.cache`.
    pub fn cache_dir(&self) -> PathBuf {
        self.cache_home
            .clone()
            .unwrap_or_else(|| self.home.join(".cache"))
    }

    /// `$XDG_CONFIG_HOME/gripper/config.toml`, falling back to `$HOME/.config`.
    pub fn config_file(&self) -> PathBuf {
        self.config_home
            .clone()
            .unwrap_or_else(|| self.home.join(".config"))
            .join("gripper")
            .join("config.toml")
    }

    pub fn default_screenshot_dir(&self) -> PathBuf {
        self.home.join(DEFAULT_SCREENSHOT_DIR)
    }
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<OsString>
where
    F: Fn(&str) -> Option<OsString>,
{
    lookup(key).filter(|value| !value.is_empty())
}

fn desktop<F>(lookup: &F) -> Option<String>
where
    F: Fn(&str) -> Option<OsString>,
{
    non_empty(lookup, "XDG_CURRENT_DESKTOP").map(|v| v.to_string_lossy().into_owned())
}
