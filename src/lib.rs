//! Library exports for the gripper screenshot tool.
//!
//! The binary is a thin shell over these modules: argument parsing, config
//! resolution, and the capture pipeline all live here so they can be driven
//! with mocked collaborators in tests.

pub mod capture;
pub mod check;
pub mod cli;
pub mod compositor;
pub mod config;
pub mod notification;
pub mod output;
pub mod process;
pub mod region;

pub use config::Config;
