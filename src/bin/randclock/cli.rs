//! Command line options

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result as EyreResult, WrapErr};
use randclock::module::{ClockConfig, RandomClockParams};

#[derive(Parser, Debug)]
#[command(name = "randclock", version, about = "Eight-voice random clock")]
pub struct Cli {
    /// Master density knob position (0..1)
    #[arg(long)]
    pub master: Option<f32>,

    /// Fixed seed for reproducible pulse streams
    #[arg(long)]
    pub seed: Option<u64>,

    /// JSON preset with knob positions
    #[arg(long)]
    pub preset: Option<PathBuf>,

    /// Edge ramp in milliseconds (0 = hard edges)
    #[arg(long, default_value_t = 0.0)]
    pub slew_ms: f32,

    /// Run offline for this many seconds and log pulse statistics
    #[arg(long, value_name = "SECONDS")]
    pub headless: Option<f32>,

    /// Sample rate used in headless mode
    #[arg(long, default_value_t = 48_000.0)]
    pub sample_rate: f32,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Knob positions: preset first, then command line overrides.
    pub fn params(&self) -> EyreResult<RandomClockParams> {
        let mut params = match &self.preset {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .wrap_err_with(|| format!("failed to read preset {}", path.display()))?;
                RandomClockParams::from_json(&json)
                    .wrap_err_with(|| format!("failed to parse preset {}", path.display()))?
            }
            None => RandomClockParams::default(),
        };

        if let Some(master) = self.master {
            params.master_density = master;
        }
        Ok(params)
    }

    pub fn config(&self) -> ClockConfig {
        let config = ClockConfig::default().slew_time(self.slew_ms.max(0.0) / 1000.0);
        match self.seed {
            Some(seed) => config.seed(seed),
            None => config,
        }
    }
}
