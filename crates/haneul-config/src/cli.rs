//! Command-line argument parsing for haneul.

use std::path::PathBuf;

use clap::Parser;
use haneul_core::{Location, TimeFormat};

use crate::Config;

/// haneul command-line arguments.
///
/// CLI values override settings loaded from `config.toml`.
#[derive(Parser, Debug, Default)]
#[command(name = "haneul", version, about = "A terminal clock that paints the sky of your time and place")]
pub struct CliArgs {
    /// Path to the config file (overrides the default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Observer latitude in degrees. Requires --lng.
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Observer longitude in degrees. Requires --lat.
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lng: Option<f64>,

    /// Use a 12-hour clock.
    #[arg(long)]
    pub twelve_hour: bool,

    /// Skip the IP geolocation lookup.
    #[arg(long)]
    pub no_geolocation: bool,

    /// Noise and star seed.
    #[arg(long)]
    pub seed: Option<u32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Print the effective config as TOML and exit.
    #[arg(long)]
    pub print_config: bool,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let (Some(lat), Some(lng)) = (args.lat, args.lng) {
            self.location = Some(Location::new(lat, lng));
        }
        if args.twelve_hour {
            self.display.time_format = TimeFormat::TwelveHour;
        }
        if args.no_geolocation {
            self.geolocation.enabled = false;
        }
        if let Some(seed) = args.seed {
            self.scene.seed = Some(seed);
        }
        if let Some(ref level) = args.log_level {
            self.log.level = level.clone();
        }
    }
}
