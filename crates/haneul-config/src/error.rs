//! Configuration error types.

use haneul_sky::PaletteError;

/// Errors that can occur when loading, saving, or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the config file from disk.
    #[error("failed to read config: {0}")]
    ReadError(#[source] std::io::Error),

    /// Failed to write the config file to disk.
    #[error("failed to write config: {0}")]
    WriteError(#[source] std::io::Error),

    /// Failed to parse TOML content.
    #[error("failed to parse config: {0}")]
    ParseError(#[source] toml::de::Error),

    /// Failed to serialize config to TOML.
    #[error("failed to serialize config: {0}")]
    SerializeError(#[source] toml::ser::Error),

    /// The palette table violates its invariants.
    #[error("invalid palette: {0}")]
    InvalidPalette(#[from] PaletteError),

    /// A configured location is out of range.
    #[error("invalid location: lat {lat}, lng {lng}")]
    InvalidLocation { lat: f64, lng: f64 },

    /// A scene dimension is unusable.
    #[error("invalid scene.{field}: {reason}")]
    InvalidScene {
        field: &'static str,
        reason: String,
    },
}
