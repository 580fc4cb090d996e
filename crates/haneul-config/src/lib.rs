//! Configuration for the haneul clock.
//!
//! Settings persist as TOML under the platform config directory. Every
//! section is optional in the file; missing values fall back to defaults.
//! The sky palette lives here as a versioned keyframe table so alternate
//! palettes can be swapped without touching the interpolation code.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    Config, DisplayConfig, GeolocationConfig, LogConfig, PALETTE_VERSION, PaletteConfig,
    SceneConfig, project_dirs,
};
pub use error::ConfigError;
