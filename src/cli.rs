//! Command-line interface.

use crate::config::types::ImageType;
use crate::region::Geometry;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

const FORMAT_HELP: &str = "\
Output filename format:
    %Y: Full year (4 digits)
    %y: Year since 2000 (2 digits)
    %M: Month of the year (2 digits)
    %d: Day of the month (2 digits)
    %h: Hour in 24-hour format (2 digits)
    %H: Hour in 12-hour format (2 digits)
    %p: 'AM' or 'PM'
    %m: Minute (2 digits)
    %s: Second (2 digits)
    %%: Literal percent

Example: 'Screenshot_%y-%M-%d_%h-%m-%s' => 'Screenshot_25-01-13_02-54-46.png'";

#[derive(Parser, Debug)]
#[command(name = "gripper")]
#[command(
    version,
    about = "Screenshot tool for wlroots-based Wayland compositors",
    disable_version_flag = true,
    subcommand_value_name = "MODE",
    subcommand_help_heading = "Modes",
    after_long_help = FORMAT_HELP
)]
pub struct Cli {
    /// Show version
    #[arg(
        short = 'v',
        long = "version",
        action = ArgAction::Version,
        value_parser = clap::value_parser!(bool)
    )]
    version: (),

    /// Check compositor support and needed commands
    #[arg(long)]
    pub check: bool,

    #[command(subcommand)]
    pub mode: Option<ModeCommand>,

    #[command(flatten)]
    pub capture: CaptureArgs,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ModeCommand {
    /// Capture fullscreen
    Full,
    /// Capture selected region using slurp
    Region,
    /// Capture last selected region
    LastRegion,
    /// Capture active window
    ActiveWindow,
    /// Capture custom region, given as 'X,Y WxH'
    Custom {
        #[arg(value_name = "REGION")]
        geometry: Geometry,
    },
    /// Run without capturing anything
    #[command(hide = true)]
    Test,
}

#[derive(Args, Debug, Clone, Default)]
pub struct CaptureArgs {
    /// Include cursor in the screenshot
    #[arg(short = 'c', global = true)]
    pub cursor: bool,

    /// Capture all outputs (mode `full` only)
    #[arg(long, global = true, overrides_with = "output")]
    pub all: bool,

    /// Save the captured image to disk
    #[arg(long, global = true)]
    pub save: bool,

    /// Save the captured image to the clipboard
    #[arg(long, global = true)]
    pub copy: bool,

    /// Don't save the captured image anywhere (overrides --save and --copy)
    #[arg(long, global = true)]
    pub no_save: bool,

    /// Where screenshots are saved [env: SCREENSHOT_DIR, default: ~/Pictures/Screenshots]
    #[arg(short = 'd', value_name = "DIR", global = true)]
    pub dir: Option<PathBuf>,

    /// File to save to; overrides -d and --format, its extension picks the image type
    #[arg(short = 'f', value_name = "PATH", global = true)]
    pub file: Option<PathBuf>,

    /// Format of the output file name
    #[arg(long, value_name = "FORMAT", global = true, long_help = FORMAT_HELP)]
    pub format: Option<String>,

    /// Image type [default: png]
    #[arg(short = 't', value_name = "TYPE", value_enum, global = true)]
    pub image_type: Option<ImageType>,

    /// Output/monitor name to capture (mode `full` only)
    #[arg(short = 'o', value_name = "OUTPUT", global = true, overrides_with = "all")]
    pub output: Option<String>,

    /// Wait for the given seconds before capturing
    #[arg(short = 'w', value_name = "SEC", global = true)]
    pub wait: Option<u64>,

    /// Scale the final image
    #[arg(short = 's', value_name = "FACTOR", global = true, value_parser = parse_scale)]
    pub scale: Option<f64>,

    /// PNG compression level from 0 to 9 [default: 6]
    #[arg(
        long,
        value_name = "N",
        global = true,
        value_parser = clap::value_parser!(u8).range(0..=9)
    )]
    pub png_level: Option<u8>,

    /// JPEG quality from 0 to 100 [default: 80]
    #[arg(
        long,
        value_name = "N",
        global = true,
        value_parser = clap::value_parser!(u8).range(0..=100)
    )]
    pub jpeg_quality: Option<u8>,

    /// Don't cache the captured region for `last-region`
    #[arg(long, global = true)]
    pub no_save_region: bool,

    /// Print extra output
    #[arg(long, global = true)]
    pub verbose: bool,
}

fn parse_scale(value: &str) -> Result<f64, String> {
    let scale: f64 = value
        .parse()
        .map_err(|_| format!("`{value}` is not a number"))?;
    if !scale.is_finite() {
        return Err("input number is too big".to_string());
    }
    if scale <= 0.0 {
        return Err("input a number greater than 0".to_string());
    }
    Ok(scale)
}
