//! Per-frame time sample.

use chrono::{DateTime, FixedOffset, Utc};

/// Horizontal coordinates of a celestial body, in radians.
///
/// Altitude is measured up from the horizon; azimuth is measured from south,
/// positive toward west.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Horizontal {
    pub altitude: f64,
    pub azimuth: f64,
}

/// Everything the engine needs to know about "now" for one frame.
///
/// Rebuilt from the wall clock every frame and never cached across frames.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSample {
    /// The instant sampled, in the observer's local offset.
    pub instant: DateTime<FixedOffset>,
    /// Local hour of day in `[0, 24)`.
    pub fractional_hour: f32,
    pub sun: Horizontal,
    pub moon: Horizontal,
    /// Illuminated fraction of the moon's disk in `[0, 1]`.
    pub moon_illumination: f32,
    /// Today's sunrise, `None` during polar day or night.
    pub sunrise: Option<DateTime<Utc>>,
    /// Today's sunset, `None` during polar day or night.
    pub sunset: Option<DateTime<Utc>>,
}
