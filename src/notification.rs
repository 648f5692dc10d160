//! Desktop notifications via `notify-send`.

use crate::process::{self, CommandRunner, Output, ProcessError};
use std::sync::Arc;
use thiserror::Error;

/// Application name shown by the notification daemon.
pub const APP_NAME: &str = "Gripper";

/// Milliseconds the notification stays visible.
pub const TIMEOUT_MS: u32 = 3000;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notify-send is not installed")]
    Unavailable,

    #[error("failed to send notification: {0}")]
    Command(#[from] ProcessError),
}

/// Abstraction over sending a notification so captures can be tested silently.
pub trait Notifier: Send + Sync {
    fn notify(&self, summary: &str, body: &str) -> Result<(), NotifyError>;
}

/// Sends notifications by running `notify-send`.
#[derive(Clone)]
pub struct DesktopNotifier {
    runner: Arc<dyn CommandRunner>,
}

impl DesktopNotifier {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, summary: &str, body: &str) -> Result<(), NotifyError> {
        if !process::command_found("notify-send") {
            return Err(NotifyError::Unavailable);
        }
        let command = notify_command(summary, body)?;
        self.runner.run(&command, Output::Discard)?;
        Ok(())
    }
}

/// Build the `notify-send` command line.
pub fn notify_command(summary: &str, body: &str) -> Result<String, ProcessError> {
    Ok(format!(
        "notify-send -t {} -a {} {} {}",
        TIMEOUT_MS,
        APP_NAME,
        process::quote(summary)?,
        process::quote(body)?
    ))
}

/// Send a notification, logging instead of failing.
pub fn send_best_effort(notifier: &dyn Notifier, summary: &str, body: &str) {
    match notifier.notify(summary, body) {
        Ok(()) => log::debug!("Notification sent: {}", summary),
        Err(e) => log::info!("Failed to send notification: {}", e),
    }
}
