//! Configuration structs with defaults and TOML persistence.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use haneul_core::{ColorKeyframe, Location, TimeFormat};
use haneul_sky::{DEFAULT_KEYFRAMES, GridSpec, Palette, SceneSettings, TerrainTints};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::ConfigError;

/// Palette table format understood by this build.
pub const PALETTE_VERSION: u32 = 1;

const CONFIG_FILE: &str = "config.toml";

/// Upper bound on grid segments per side.
pub const MAX_SEGMENTS: u32 = 1024;
/// Upper bound on the star count.
pub const MAX_STARS: usize = 100_000;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Fixed observer location; skips geolocation when set.
    pub location: Option<Location>,
    pub geolocation: GeolocationConfig,
    pub display: DisplayConfig,
    pub scene: SceneConfig,
    pub palette: PaletteConfig,
    pub log: LogConfig,
}

/// One-shot IP geolocation lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeolocationConfig {
    pub enabled: bool,
    /// JSON endpoint returning `latitude`/`longitude` (or `lat`/`lon`).
    pub endpoint: String,
    /// Upper bound on the whole request.
    pub timeout_ms: u64,
}

/// Clock overlay settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    pub time_format: TimeFormat,
    pub show_seconds: bool,
    /// Show the next sunrise/sunset countdown.
    pub show_label: bool,
    pub show_location: bool,
}

/// Scene topology and seeding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    pub terrain_size: f32,
    pub terrain_segments: u32,
    pub water_size: f32,
    pub water_segments: u32,
    pub star_count: usize,
    /// Noise and star seed. Random per run when unset.
    pub seed: Option<u32>,
    /// Minimum interval between terrain drift updates.
    pub terrain_refresh_ms: u64,
}

/// Versioned sky palette table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PaletteConfig {
    pub version: u32,
    pub keyframes: Vec<ColorKeyframe>,
    pub terrain: TerrainTints,
}

/// Log file settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    pub enabled: bool,
    /// `EnvFilter` directive, e.g. `info` or `haneul_sky=debug`.
    pub level: String,
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "https://ipapi.co/json/".to_string(),
            timeout_ms: 3000,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            time_format: TimeFormat::TwentyFourHour,
            show_seconds: true,
            show_label: true,
            show_location: true,
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        let defaults = SceneSettings::default();
        Self {
            terrain_size: defaults.terrain.size,
            terrain_segments: defaults.terrain.segments,
            water_size: defaults.water.size,
            water_segments: defaults.water.segments,
            star_count: defaults.star_count,
            seed: None,
            terrain_refresh_ms: (defaults.terrain_refresh_secs * 1000.0) as u64,
        }
    }
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            version: PALETTE_VERSION,
            keyframes: DEFAULT_KEYFRAMES.to_vec(),
            terrain: TerrainTints::default(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: "info".to_string(),
        }
    }
}

impl SceneConfig {
    /// Reject sizes that are not finite and positive, and oversized grids.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, size) in [
            ("terrain_size", self.terrain_size),
            ("water_size", self.water_size),
        ] {
            if !size.is_finite() || size <= 0.0 {
                return Err(ConfigError::InvalidScene {
                    field,
                    reason: format!("must be a positive number, got {size}"),
                });
            }
        }
        for (field, segments) in [
            ("terrain_segments", self.terrain_segments),
            ("water_segments", self.water_segments),
        ] {
            if !(1..=MAX_SEGMENTS).contains(&segments) {
                return Err(ConfigError::InvalidScene {
                    field,
                    reason: format!("must be between 1 and {MAX_SEGMENTS}, got {segments}"),
                });
            }
        }
        if self.star_count > MAX_STARS {
            return Err(ConfigError::InvalidScene {
                field: "star_count",
                reason: format!("must be at most {MAX_STARS}, got {}", self.star_count),
            });
        }
        Ok(())
    }
}

/// Platform directories for config and data files.
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "haneul")
}

impl Config {
    /// Default config file path, if the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load and validate the config at `path`; a missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config = Self::from_toml(&contents)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate TOML text.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::SerializeError)
    }

    /// Write the config to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::WriteError)?;
        }
        std::fs::write(path, self.to_toml()?).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Check the location, scene dimensions and palette table.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(loc) = self.location
            && !loc.is_valid()
        {
            return Err(ConfigError::InvalidLocation {
                lat: loc.lat,
                lng: loc.lng,
            });
        }
        if self.palette.version > PALETTE_VERSION {
            warn!(
                version = self.palette.version,
                supported = PALETTE_VERSION,
                "palette table is newer than this build; reading it as v{PALETTE_VERSION}"
            );
        }
        self.scene.validate()?;
        self.palette()?;
        Ok(())
    }

    /// Build the validated palette.
    pub fn palette(&self) -> Result<Palette, ConfigError> {
        Ok(Palette::new(
            self.palette.keyframes.clone(),
            self.palette.terrain,
        )?)
    }

    /// Scene settings, using `fallback_seed` when no seed is configured.
    pub fn scene_settings(&self, fallback_seed: u32) -> SceneSettings {
        let scene = &self.scene;
        SceneSettings {
            terrain: GridSpec::new(scene.terrain_size, scene.terrain_segments),
            water: GridSpec::new(scene.water_size, scene.water_segments),
            star_count: scene.star_count,
            seed: scene.seed.unwrap_or(fallback_seed),
            terrain_refresh_secs: scene.terrain_refresh_ms as f64 / 1000.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use haneul_core::Rgb;
    use haneul_sky::PaletteError;

    #[test]
    fn test_default_config_serializes() {
        let toml_str = Config::default().to_toml().unwrap();
        assert!(toml_str.contains("[geolocation]"));
        assert!(toml_str.contains("timeout_ms = 3000"));
        assert!(toml_str.contains("[[palette.keyframes]]"));
        assert!(!toml_str.contains("[location]"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.location = Some(Location::new(59.91, 10.75));
        config.scene.seed = Some(7);
        let parsed = Config::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = Config::from_toml("[display]\nshow_seconds = false\n").unwrap();
        assert!(!config.display.show_seconds);
        assert_eq!(config.scene, SceneConfig::default());
        assert_eq!(config.palette, PaletteConfig::default());
        assert!(config.location.is_none());
    }

    #[test]
    fn test_location_section() {
        let config = Config::from_toml("[location]\nlat = 35.68\nlng = 139.69\n").unwrap();
        assert_eq!(config.location, Some(Location::new(35.68, 139.69)));
    }

    #[test]
    fn test_invalid_location_rejected() {
        let result = Config::from_toml("[location]\nlat = 135.0\nlng = 0.0\n");
        assert!(matches!(result, Err(ConfigError::InvalidLocation { .. })));
    }

    #[test]
    fn test_custom_palette() {
        let toml_str = r#"
[palette]
version = 1

[[palette.keyframes]]
hour = 0.0
top = [0.0, 0.0, 0.1]
bottom = [0.0, 0.0, 0.2]

[[palette.keyframes]]
hour = 12.0
top = [0.2, 0.5, 0.9]
bottom = [0.7, 0.8, 0.9]

[[palette.keyframes]]
hour = 24.0
top = [0.0, 0.0, 0.1]
bottom = [0.0, 0.0, 0.2]
"#;
        let config = Config::from_toml(toml_str).unwrap();
        let palette = config.palette().unwrap();
        assert_eq!(palette.keyframes().len(), 3);
        assert_eq!(palette.sky_colors(12.0).top, Rgb::new(0.2, 0.5, 0.9));
    }

    #[test]
    fn test_non_cyclic_palette_rejected() {
        let toml_str = r#"
[[palette.keyframes]]
hour = 0.0
top = [0.0, 0.0, 0.1]
bottom = [0.0, 0.0, 0.2]

[[palette.keyframes]]
hour = 24.0
top = [1.0, 1.0, 1.0]
bottom = [0.0, 0.0, 0.2]
"#;
        let result = Config::from_toml(toml_str);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidPalette(PaletteError::NotCyclic))
        ));
    }

    #[test]
    fn test_nan_keyframe_hour_rejected() {
        let toml_str = r#"
[[palette.keyframes]]
hour = 0.0
top = [0.0, 0.0, 0.1]
bottom = [0.0, 0.0, 0.2]

[[palette.keyframes]]
hour = nan
top = [0.5, 0.5, 0.5]
bottom = [0.5, 0.5, 0.5]

[[palette.keyframes]]
hour = 24.0
top = [0.0, 0.0, 0.1]
bottom = [0.0, 0.0, 0.2]
"#;
        let result = Config::from_toml(toml_str);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidPalette(PaletteError::HourNotFinite { index: 1 }))
        ));
    }

    #[test]
    fn test_invalid_scene_rejected() {
        for (toml_str, expected) in [
            ("[scene]\nterrain_size = 0.0\n", "terrain_size"),
            ("[scene]\nterrain_size = -5.0\n", "terrain_size"),
            ("[scene]\nwater_size = nan\n", "water_size"),
            ("[scene]\nwater_size = inf\n", "water_size"),
            ("[scene]\nterrain_segments = 0\n", "terrain_segments"),
            ("[scene]\nwater_segments = 4000000000\n", "water_segments"),
            ("[scene]\nstar_count = 10000000\n", "star_count"),
        ] {
            match Config::from_toml(toml_str) {
                Err(ConfigError::InvalidScene { field, .. }) => assert_eq!(field, expected),
                other => panic!("{toml_str:?}: unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn test_scene_limits_accepted() {
        let mut config = Config::default();
        config.scene.terrain_segments = MAX_SEGMENTS;
        config.scene.water_segments = 1;
        config.scene.star_count = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_toml_produces_error() {
        assert!(matches!(
            Config::from_toml("{{not valid}}"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);
        let mut config = Config::default();
        config.display.time_format = TimeFormat::TwelveHour;
        config.geolocation.enabled = false;

        config.save(&path).unwrap();
        let loaded = Config::load(&path).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Config::load(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_scene_settings() {
        let mut config = Config::default();
        config.scene.terrain_segments = 32;
        config.scene.terrain_refresh_ms = 250;
        let settings = config.scene_settings(99);
        assert_eq!(settings.terrain.segments, 32);
        assert_eq!(settings.seed, 99);
        assert!((settings.terrain_refresh_secs - 0.25).abs() < 1e-9);

        config.scene.seed = Some(5);
        assert_eq!(config.scene_settings(99).seed, 5);
    }
}
