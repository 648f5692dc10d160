//! Compositor detection and the IPC query commands each compositor supports.
//!
//! Query commands print plain text (an output name or `X,Y WxH` geometries) on
//! stdout. Their JSON is reshaped by `jq` inside the pipeline and is never
//! parsed here.

use std::fmt;
use std::io::{self, Write};

/// Shell pipelines used to query a compositor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositorCommands {
    /// Prints the name of the focused output.
    pub active_output: &'static str,
    /// Prints the geometry of the focused window.
    pub active_window: &'static str,
    /// Prints one geometry per visible window, for snapping the selector.
    pub windows: &'static str,
}

const HYPRLAND: CompositorCommands = CompositorCommands {
    active_output: "hyprctl monitors -j | jq -r '.[] | select(.focused) | .name'",
    active_window: concat!(
        "hyprctl activewindow -j",
        r#" | jq -r '"\(.at[0]),\(.at[1]) \(.size[0])x\(.size[1])"'"#,
    ),
    // FIXME: includes windows hidden behind a fullscreen window
    windows: concat!(
        "hyprctl clients -j",
        r#" | jq -r --argjson workspaces "$(hyprctl monitors -j | jq -r 'map(.activeWorkspace.id)')""#,
        " 'map(select([.workspace.id] | inside($workspaces)))'",
        r#" | jq -r '.[] | "\(.at[0]),\(.at[1]) \(.size[0])x\(.size[1])"'"#,
    ),
};

const SWAY: CompositorCommands = CompositorCommands {
    active_output: "swaymsg -t get_outputs | jq -r '.[] | select(.focused)' | jq -r '.name'",
    active_window: concat!(
        "swaymsg -t get_tree",
        " | jq -r 'recurse(.nodes[]?, .floating_nodes[]?) | select(.focused)'",
        r#" | jq -r '.rect | "\(.x),\(.y) \(.width)x\(.height)"'"#,
    ),
    windows: concat!(
        "swaymsg -t get_tree",
        r#" | jq -r '.. | select(.pid? and .visible?) | .rect | "\(.x),\(.y) \(.width)x\(.height)"'"#,
    ),
};

/// Compositor detected from `XDG_CURRENT_DESKTOP`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compositor {
    #[default]
    Unsupported,
    Hyprland,
    Sway,
}

impl Compositor {
    /// Match the desktop identifier reported by the session. Detection happens once.
    pub fn detect(desktop: Option<&str>) -> Self {
        match desktop {
            Some("Hyprland") => Compositor::Hyprland,
            Some("sway") => Compositor::Sway,
            _ => Compositor::Unsupported,
        }
    }

    /// Query commands, or `None` when the compositor is not supported.
    pub fn commands(self) -> Option<&'static CompositorCommands> {
        match self {
            Compositor::Unsupported => None,
            Compositor::Hyprland => Some(&HYPRLAND),
            Compositor::Sway => Some(&SWAY),
        }
    }

    pub fn is_supported(self) -> bool {
        self.commands().is_some()
    }

    pub fn active_output_cmd(self) -> Option<&'static str> {
        self.commands().map(|c| c.active_output)
    }

    pub fn active_window_cmd(self) -> Option<&'static str> {
        self.commands().map(|c| c.active_window)
    }

    pub fn windows_cmd(self) -> Option<&'static str> {
        self.commands().map(|c| c.windows)
    }

    pub fn name(self) -> &'static str {
        match self {
            Compositor::Unsupported => "Not supported",
            Compositor::Hyprland => "Hyprland",
            Compositor::Sway => "sway",
        }
    }

    /// Explain what works with this compositor.
    pub fn write_support<W: Write>(self, out: &mut W) -> io::Result<()> {
        writeln!(
            out,
            "Your compositor is {}.",
            if self.is_supported() {
                "supported"
            } else {
                "not supported"
            }
        )?;
        writeln!(
            out,
            "    Mode `active-window` is unavailable for unsupported compositor and"
        )?;
        writeln!(out, "    mode `region` does not have snap to window.")?;
        writeln!(
            out,
            "    Mode `full` is also unable to pick current output automatically."
        )?;
        writeln!(
            out,
            "    You must specify it yourself with `-o` or it will capture all outputs"
        )?;
        writeln!(out, "    which is the behaviour of `--all`.")
    }
}

impl fmt::Display for Compositor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
