//! `--check`: compositor support and presence of the external commands.

use crate::compositor::Compositor;
use crate::process;
use std::io::{self, Write};

/// Commands every capture needs.
pub const REQUIRED_COMMANDS: &[&str] = &["grim", "slurp", "jq"];

/// Commands only some sinks need.
pub const OPTIONAL_COMMANDS: &[&str] = &["wl-copy", "notify-send"];

/// Write the full report, looking commands up on `PATH`.
pub fn write_report<W: Write>(compositor: Compositor, out: &mut W) -> io::Result<()> {
    write_report_with(compositor, out, process::command_found)
}

fn write_report_with<W, F>(compositor: Compositor, out: &mut W, found: F) -> io::Result<()>
where
    W: Write,
    F: Fn(&str) -> bool,
{
    compositor.write_support(out)?;
    writeln!(out)?;

    writeln!(out, "Required commands:")?;
    write_commands(out, REQUIRED_COMMANDS, &found)?;
    writeln!(out)?;
    writeln!(out, "Optional commands:")?;
    write_commands(out, OPTIONAL_COMMANDS, &found)
}

fn write_commands<W, F>(out: &mut W, commands: &[&str], found: &F) -> io::Result<()>
where
    W: Write,
    F: Fn(&str) -> bool,
{
    for command in commands {
        let state = if found(command) { "found" } else { "not found" };
        writeln!(out, " - {}: {}", command, state)?;
    }
    Ok(())
}
