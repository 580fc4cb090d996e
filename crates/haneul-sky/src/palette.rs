//! Sky gradient keyframes and terrain tint bands.

use haneul_core::{ColorKeyframe, Rgb, smoothstep};
use serde::{Deserialize, Serialize};

use crate::error::PaletteError;

/// Tolerance for the hour-0 / hour-24 color match.
const CYCLIC_EPSILON: f32 = 1e-4;

/// Built-in sky palette, midnight to midnight.
pub const DEFAULT_KEYFRAMES: &[ColorKeyframe] = &[
    ColorKeyframe::new(0.0, Rgb::from_hex(0x0a0e24), Rgb::from_hex(0x1a1f3a)),
    ColorKeyframe::new(4.5, Rgb::from_hex(0x0c1230), Rgb::from_hex(0x2a2545)),
    ColorKeyframe::new(5.5, Rgb::from_hex(0x2b2f5c), Rgb::from_hex(0xc0607a)),
    ColorKeyframe::new(6.5, Rgb::from_hex(0x4a6fa5), Rgb::from_hex(0xf4a261)),
    ColorKeyframe::new(8.0, Rgb::from_hex(0x5b9bd5), Rgb::from_hex(0xbfe0f5)),
    ColorKeyframe::new(12.0, Rgb::from_hex(0x3f8fd8), Rgb::from_hex(0xa8d8f0)),
    ColorKeyframe::new(16.5, Rgb::from_hex(0x4d8fcc), Rgb::from_hex(0xc9e2f0)),
    ColorKeyframe::new(18.0, Rgb::from_hex(0x3d5a99), Rgb::from_hex(0xf08a4b)),
    ColorKeyframe::new(19.0, Rgb::from_hex(0x2a2f5e), Rgb::from_hex(0xd0576b)),
    ColorKeyframe::new(20.5, Rgb::from_hex(0x121638), Rgb::from_hex(0x2e2a50)),
    ColorKeyframe::new(24.0, Rgb::from_hex(0x0a0e24), Rgb::from_hex(0x1a1f3a)),
];

/// Sky gradient for one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyColors {
    pub top: Rgb,
    pub bottom: Rgb,
}

/// Ground colors for the four anchor phases of the day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerrainTints {
    pub night: Rgb,
    pub dawn: Rgb,
    pub day: Rgb,
    pub dusk: Rgb,
}

impl Default for TerrainTints {
    fn default() -> Self {
        Self {
            night: Rgb::from_hex(0x1c2433),
            dawn: Rgb::from_hex(0x7a5a4a),
            day: Rgb::from_hex(0x4f7a3a),
            dusk: Rgb::from_hex(0x6a4a3f),
        }
    }
}

/// A validated keyframe table plus terrain tints.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    keyframes: Vec<ColorKeyframe>,
    terrain: TerrainTints,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            keyframes: DEFAULT_KEYFRAMES.to_vec(),
            terrain: TerrainTints::default(),
        }
    }
}

impl Palette {
    /// Validate and wrap a keyframe table.
    ///
    /// The table must start at hour 0, end at hour 24 with the same colors,
    /// never decrease in hour, and keep every channel in `[0, 1]`.
    pub fn new(keyframes: Vec<ColorKeyframe>, terrain: TerrainTints) -> Result<Self, PaletteError> {
        validate(&keyframes)?;
        Ok(Self { keyframes, terrain })
    }

    pub fn keyframes(&self) -> &[ColorKeyframe] {
        &self.keyframes
    }

    pub fn terrain_tints(&self) -> &TerrainTints {
        &self.terrain
    }

    /// Interpolated sky gradient at hour `h`.
    pub fn sky_colors(&self, h: f32) -> SkyColors {
        let frames = &self.keyframes;
        let last = frames.len() - 1;

        let upper = match frames.iter().position(|k| k.hour > h) {
            Some(0) => 1,
            Some(i) => i,
            None => last,
        };
        let a = &frames[upper - 1];
        let b = &frames[upper];

        let span = b.hour - a.hour;
        let t = if span == 0.0 {
            0.0
        } else {
            ((h - a.hour) / span).clamp(0.0, 1.0)
        };

        SkyColors {
            top: a.top.lerp(b.top, t),
            bottom: a.bottom.lerp(b.bottom, t),
        }
    }

    /// Terrain tint at hour `h`, blended across five bands.
    ///
    /// Bands switch at hours 5, 7, 17 and 20; inside each band the blend
    /// follows its own smoothstep window, so band edges may step.
    pub fn terrain_color(&self, h: f32) -> Rgb {
        let t = &self.terrain;
        if h < 5.0 {
            t.night.lerp(t.dawn, smoothstep(4.0, 6.0, h))
        } else if h < 7.0 {
            t.dawn.lerp(t.day, smoothstep(5.0, 8.0, h))
        } else if h < 17.0 {
            t.day
        } else if h < 20.0 {
            t.day.lerp(t.dusk, smoothstep(17.0, 19.0, h))
        } else {
            t.dusk.lerp(t.night, smoothstep(19.0, 21.0, h))
        }
    }
}

fn validate(keyframes: &[ColorKeyframe]) -> Result<(), PaletteError> {
    if keyframes.len() < 2 {
        return Err(PaletteError::TooFewKeyframes(keyframes.len()));
    }
    if let Some(index) = keyframes.iter().position(|k| !k.hour.is_finite()) {
        return Err(PaletteError::HourNotFinite { index });
    }
    let first = &keyframes[0];
    let last = &keyframes[keyframes.len() - 1];

    if first.hour != 0.0 {
        return Err(PaletteError::FirstHourNotZero(first.hour));
    }
    if last.hour != 24.0 {
        return Err(PaletteError::LastHourNotTwentyFour(last.hour));
    }

    for (index, pair) in keyframes.windows(2).enumerate() {
        if pair[1].hour < pair[0].hour {
            return Err(PaletteError::HoursDecreasing {
                index: index + 1,
                hour: pair[1].hour,
                previous: pair[0].hour,
            });
        }
    }

    if let Some(index) = keyframes
        .iter()
        .position(|k| !k.top.is_normalized() || !k.bottom.is_normalized())
    {
        return Err(PaletteError::ColorOutOfRange { index });
    }

    if first.top.distance(&last.top) > CYCLIC_EPSILON
        || first.bottom.distance(&last.bottom) > CYCLIC_EPSILON
    {
        return Err(PaletteError::NotCyclic);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Rgb, b: Rgb) {
        assert!(a.distance(&b) < 1e-5, "{a:?} != {b:?}");
    }

    #[test]
    fn test_default_palette_is_valid() {
        assert!(validate(DEFAULT_KEYFRAMES).is_ok());
    }

    #[test]
    fn test_sky_colors_cyclic() {
        let palette = Palette::default();
        let at_zero = palette.sky_colors(0.0);
        let at_24 = palette.sky_colors(24.0);
        assert_close(at_zero.top, at_24.top);
        assert_close(at_zero.bottom, at_24.bottom);
        let almost = palette.sky_colors(23.9999);
        assert!(almost.top.distance(&at_zero.top) < 1e-3);
    }

    #[test]
    fn test_sky_colors_in_range() {
        let palette = Palette::default();
        for i in 0..2400 {
            let h = i as f32 / 100.0;
            let sky = palette.sky_colors(h);
            assert!(sky.top.is_normalized(), "top out of range at {h}");
            assert!(sky.bottom.is_normalized(), "bottom out of range at {h}");
        }
    }

    #[test]
    fn test_sky_colors_hit_keyframes() {
        let palette = Palette::default();
        let noon = palette.sky_colors(12.0);
        assert_close(noon.top, Rgb::from_hex(0x3f8fd8));
        assert_close(noon.bottom, Rgb::from_hex(0xa8d8f0));
    }

    #[test]
    fn test_sky_colors_interpolate_between_keyframes() {
        let palette = Palette::new(
            vec![
                ColorKeyframe::new(0.0, Rgb::BLACK, Rgb::BLACK),
                ColorKeyframe::new(12.0, Rgb::WHITE, Rgb::WHITE),
                ColorKeyframe::new(24.0, Rgb::BLACK, Rgb::BLACK),
            ],
            TerrainTints::default(),
        )
        .unwrap();
        assert_close(palette.sky_colors(6.0).top, Rgb::new(0.5, 0.5, 0.5));
        assert_close(palette.sky_colors(18.0).bottom, Rgb::new(0.5, 0.5, 0.5));
    }

    #[test]
    fn test_identical_bracket_hours_do_not_divide_by_zero() {
        let palette = Palette::new(
            vec![
                ColorKeyframe::new(0.0, Rgb::BLACK, Rgb::BLACK),
                ColorKeyframe::new(6.0, Rgb::BLACK, Rgb::BLACK),
                ColorKeyframe::new(6.0, Rgb::WHITE, Rgb::WHITE),
                ColorKeyframe::new(24.0, Rgb::BLACK, Rgb::BLACK),
            ],
            TerrainTints::default(),
        )
        .unwrap();
        let past = palette.sky_colors(24.0);
        assert!(past.top.r.is_finite());
        let step = palette.sky_colors(6.0);
        assert!(step.top.is_normalized());
    }

    #[test]
    fn test_validation_errors() {
        let k = |h: f32| ColorKeyframe::new(h, Rgb::BLACK, Rgb::BLACK);
        let tints = TerrainTints::default();

        assert_eq!(
            Palette::new(vec![k(0.0)], tints),
            Err(PaletteError::TooFewKeyframes(1))
        );
        assert_eq!(
            Palette::new(vec![k(1.0), k(24.0)], tints),
            Err(PaletteError::FirstHourNotZero(1.0))
        );
        assert_eq!(
            Palette::new(vec![k(0.0), k(23.0)], tints),
            Err(PaletteError::LastHourNotTwentyFour(23.0))
        );
        assert!(matches!(
            Palette::new(vec![k(0.0), k(12.0), k(6.0), k(24.0)], tints),
            Err(PaletteError::HoursDecreasing { index: 2, .. })
        ));

        let bright = ColorKeyframe::new(12.0, Rgb::new(1.2, 0.0, 0.0), Rgb::BLACK);
        assert_eq!(
            Palette::new(vec![k(0.0), bright, k(24.0)], tints),
            Err(PaletteError::ColorOutOfRange { index: 1 })
        );

        let white_end = ColorKeyframe::new(24.0, Rgb::WHITE, Rgb::BLACK);
        assert_eq!(
            Palette::new(vec![k(0.0), white_end], tints),
            Err(PaletteError::NotCyclic)
        );
    }

    #[test]
    fn test_non_finite_hours_rejected() {
        let k = |h: f32| ColorKeyframe::new(h, Rgb::BLACK, Rgb::BLACK);
        let tints = TerrainTints::default();

        assert_eq!(
            Palette::new(vec![k(0.0), k(f32::NAN), k(24.0)], tints),
            Err(PaletteError::HourNotFinite { index: 1 })
        );
        assert_eq!(
            Palette::new(vec![k(0.0), k(f32::INFINITY), k(24.0)], tints),
            Err(PaletteError::HourNotFinite { index: 1 })
        );
        assert_eq!(
            Palette::new(vec![k(f32::NAN), k(24.0)], tints),
            Err(PaletteError::HourNotFinite { index: 0 })
        );
    }

    #[test]
    fn test_terrain_bands() {
        let palette = Palette::default();
        let tints = *palette.terrain_tints();
        assert_close(palette.terrain_color(2.0), tints.night);
        assert_close(palette.terrain_color(12.0), tints.day);
        assert_close(palette.terrain_color(17.0), tints.day);
        assert_close(palette.terrain_color(19.5), tints.dusk);
        assert_close(palette.terrain_color(23.0), tints.night);
        assert_close(palette.terrain_color(4.999), tints.night.lerp(tints.dawn, smoothstep(4.0, 6.0, 4.999)));
        assert_close(palette.terrain_color(5.0), tints.dawn);
    }
}
