//! randclock - eight-voice random clock in the terminal
//!
//! Run with: cargo run
//! Offline statistics: cargo run -- --headless 60 --seed 1

mod app;
mod cli;
mod click;
mod headless;
mod ui;

use std::{fs::File, sync::Mutex};

use clap::Parser;
use color_eyre::eyre::{Result as EyreResult, WrapErr};
use tracing_subscriber::EnvFilter;

use app::RandClock;
use cli::Cli;

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(&cli)?;

    let params = cli.params()?;
    let config = cli.config();

    match cli.headless {
        Some(seconds) => headless::run(params, config, seconds, cli.sample_rate),
        None => RandClock::new(params, config).run(),
    }
}

/// Logs go to `--log-file` when given. Without one, headless runs log to
/// stderr and the interactive UI stays silent so the terminal is not
/// corrupted.
fn init_tracing(cli: &Cli) -> EyreResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Some(path) = &cli.log_file {
        let file = File::create(path)
            .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    } else if cli.headless.is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    Ok(())
}
