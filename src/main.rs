use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::anyhow;
use clap::Parser;
use gripper::capture::{CaptureDependencies, CaptureError, Capturer};
use gripper::check;
use gripper::cli::Cli;
use gripper::config::{Config, Environment, FileConfig};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.capture.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(capture_err) = err.downcast_ref::<CaptureError>() {
                match capture_err {
                    CaptureError::SelectionCancelled => {
                        log::warn!("{}", capture_err);
                        return ExitCode::FAILURE;
                    }
                    CaptureError::Unsupported { compositor, .. } => {
                        log::error!("{}", err);
                        let _ = compositor.write_support(&mut io::stderr());
                        return ExitCode::FAILURE;
                    }
                    _ => {}
                }
            }
            log::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if cli.check {
        let compositor = Environment::compositor_from_process();
        let mut stdout = io::stdout().lock();
        check::write_report(compositor, &mut stdout)?;
        stdout.flush()?;
        return Ok(());
    }

    let mode = cli
        .mode
        .ok_or_else(|| anyhow!("Unspecified mode, see `gripper --help`"))?;

    let env = Environment::from_process()?;
    let file = FileConfig::load(&env.config_file())?;
    let config = Config::resolve(&mode, &cli.capture, &env, &file, &chrono::Local::now())?;
    config.log_summary();

    let result = Capturer::new(&config, CaptureDependencies::default()).run()?;
    if let Some(destination) = result.destination() {
        println!("Saved to {}", destination);
    }
    Ok(())
}
