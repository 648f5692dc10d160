//! Confirmation before overwriting an existing screenshot.

use std::io::{self, BufRead, Write};
use std::path::Path;

/// Decides whether an existing regular file may be overwritten.
pub trait OverwriteConfirm: Send + Sync {
    fn confirm(&self, path: &Path) -> io::Result<bool>;
}

/// Asks on the terminal: `Overriding <path>, are you sure? [y/N]`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinConfirm;

impl OverwriteConfirm for StdinConfirm {
    fn confirm(&self, path: &Path) -> io::Result<bool> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        prompt(&mut stdin.lock(), &mut stdout.lock(), path)
    }
}

/// Overwrites without asking.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysConfirm;

impl OverwriteConfirm for AlwaysConfirm {
    fn confirm(&self, _path: &Path) -> io::Result<bool> {
        Ok(true)
    }
}

/// Never overwrites.
#[derive(Debug, Default, Clone, Copy)]
pub struct NeverConfirm;

impl OverwriteConfirm for NeverConfirm {
    fn confirm(&self, _path: &Path) -> io::Result<bool> {
        Ok(false)
    }
}

/// Write the prompt to `output` and read one line of `input`.
///
/// Only a leading `y` or `Y` counts as consent. End of input is an error.
pub fn prompt<R, W>(input: &mut R, output: &mut W, path: &Path) -> io::Result<bool>
where
    R: BufRead,
    W: Write,
{
    write!(output, "Overriding {}, are you sure? [y/N] ", path.display())?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "no answer on standard input",
        ));
    }

    Ok(matches!(line.chars().next(), Some('y' | 'Y')))
}
