//! Running external commands through the shell.
//!
//! Every collaborator (grim, slurp, wl-copy, notify-send, compositor IPC tools)
//! is driven through [`CommandRunner::run`]. One invocation yields exactly one
//! outcome; nothing here retries.

use std::borrow::Cow;
use std::io::Read;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use thiserror::Error;

/// What to do with the child's standard output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    /// Pipe stdout back to the caller. Stderr still goes to the null sink.
    Capture,
    /// Send both stdout and stderr to the null sink.
    Discard,
}

/// Failures of a single external command invocation.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}")]
    Exit { command: String, status: ExitStatus },

    #[error("failed to read output of `{command}`: {source}")]
    Read {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot pass {0:?} to the shell")]
    Unquotable(String),
}

impl ProcessError {
    /// Whether the command ran and reported failure (as opposed to never running).
    pub fn is_exit(&self) -> bool {
        matches!(self, ProcessError::Exit { .. })
    }
}

/// Abstraction over spawning commands so the capture pipeline can be driven by mocks.
pub trait CommandRunner: Send + Sync {
    /// Run `command` with `sh -c`. Returns captured stdout for [`Output::Capture`]
    /// and an empty buffer for [`Output::Discard`].
    fn run(&self, command: &str, output: Output) -> Result<Vec<u8>, ProcessError>;
}

/// Runs commands for real via `/bin/sh`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellRunner;

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str, output: Output) -> Result<Vec<u8>, ProcessError> {
        log::debug!("$ {}", command);

        let stdout = match output {
            Output::Capture => Stdio::piped(),
            Output::Discard => Stdio::null(),
        };

        let mut child = Command::new("/bin/sh")
            .arg("-c")
            .arg(command)
            .stdin(Stdio::inherit())
            .stdout(stdout)
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| ProcessError::Spawn {
                command: command.to_string(),
                source,
            })?;

        // Drain stdout before waiting so a chatty child cannot block on a full pipe.
        let mut captured = Vec::new();
        let read_result = match child.stdout.take() {
            Some(mut pipe) => pipe.read_to_end(&mut captured).map(|_| ()),
            None => Ok(()),
        };

        let status = child.wait().map_err(|source| ProcessError::Spawn {
            command: command.to_string(),
            source,
        })?;

        if !status.success() {
            return Err(ProcessError::Exit {
                command: command.to_string(),
                status,
            });
        }

        read_result.map_err(|source| ProcessError::Read {
            command: command.to_string(),
            source,
        })?;

        log::trace!("`{}` produced {} bytes", command, captured.len());
        Ok(captured)
    }
}

/// Quote a single argument for inclusion in a `sh -c` command line.
pub fn quote(arg: &str) -> Result<Cow<'_, str>, ProcessError> {
    shlex::try_quote(arg).map_err(|_| ProcessError::Unquotable(arg.to_string()))
}

/// Quote a path for a `sh -c` command line. Paths that are not UTF-8 are refused
/// rather than rewritten, so the command names exactly the file that was checked.
pub fn quote_path(path: &Path) -> Result<Cow<'_, str>, ProcessError> {
    let text = path
        .to_str()
        .ok_or_else(|| ProcessError::Unquotable(path.display().to_string()))?;
    quote(text)
}

/// Decode captured output as UTF-8 text with the trailing newline removed.
pub fn output_text(bytes: Vec<u8>) -> String {
    let mut text = String::from_utf8_lossy(&bytes).into_owned();
    while text.ends_with('\n') || text.ends_with('\r') {
        text.pop();
    }
    text
}

/// Whether `command` can be found on `PATH`.
pub fn command_found(command: &str) -> bool {
    which::which(command).is_ok()
}
