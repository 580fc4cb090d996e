//! Palette validation errors.

/// Reasons a keyframe table cannot be used as a sky palette.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PaletteError {
    /// Interpolation needs at least one bracket pair.
    #[error("palette needs at least 2 keyframes, got {0}")]
    TooFewKeyframes(usize),

    #[error("keyframe {index} hour is not a finite number")]
    HourNotFinite { index: usize },

    #[error("first keyframe must be at hour 0, got {0}")]
    FirstHourNotZero(f32),

    #[error("last keyframe must be at hour 24, got {0}")]
    LastHourNotTwentyFour(f32),

    #[error("keyframe {index} at hour {hour} precedes previous hour {previous}")]
    HoursDecreasing { index: usize, hour: f32, previous: f32 },

    #[error("keyframe {index} has a color channel outside [0, 1]")]
    ColorOutOfRange { index: usize },

    /// The 24:00 colors must match the 0:00 colors.
    #[error("palette is not cyclic: hour 24 colors differ from hour 0")]
    NotCyclic,
}
