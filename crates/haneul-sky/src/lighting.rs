//! Day-phase factors and light parameters.
//!
//! Pure functions of the fractional hour, the sun altitude (radians) and,
//! for the star twinkle, elapsed seconds.

use haneul_core::{Rgb, lerp, smoothstep};

pub const FOG_DENSITY_DAY: f32 = 0.003;
pub const FOG_DENSITY_NIGHT: f32 = 0.008;

pub const AMBIENT_RANGE: (f32, f32) = (0.05, 0.3);
pub const HEMI_RANGE: (f32, f32) = (0.1, 0.4);
pub const EXPOSURE_RANGE: (f32, f32) = (0.5, 1.2);

/// Directional light turns warm below this sun altitude.
pub const WARM_LIGHT_ALTITUDE: f64 = 0.2;
pub const WARM_LIGHT: Rgb = Rgb::from_hex(0xffb070);

/// Sun altitude window in which the disk is drawn large and orange.
pub const HORIZON_BAND: (f64, f64) = (-0.05, 0.15);
pub const SUN_WARM: Rgb = Rgb::from_hex(0xff7a30);
pub const SUN_PALE: Rgb = Rgb::from_hex(0xfff4d6);

/// The sun stays drawn slightly below the horizon; the moon does not.
pub const SUN_VISIBLE_ALTITUDE: f64 = -0.05;
pub const MOON_VISIBLE_ALTITUDE: f64 = 0.0;

/// Ambient tint at full night.
pub const NIGHT_AMBIENT: Rgb = Rgb::from_hex(0x303a66);

/// How much of full daylight is present: rises over 6–8h, falls over 18–20h.
pub fn day_amount(h: f32) -> f32 {
    smoothstep(6.0, 8.0, h) - smoothstep(18.0, 20.0, h)
}

/// Night factor driving fog: `smoothstep(19,22,h) − smoothstep(4,7,h)`.
///
/// The morning term saturates before the evening term rises, so this never
/// exceeds zero on `[0, 24)` and fog stays at its daytime density.
pub fn nightness(h: f32) -> f32 {
    smoothstep(19.0, 22.0, h) - smoothstep(4.0, 7.0, h)
}

pub fn fog_density(h: f32) -> f32 {
    lerp(FOG_DENSITY_DAY, FOG_DENSITY_NIGHT, nightness(h).max(0.0))
}

pub fn ambient_intensity(day: f32) -> f32 {
    lerp(AMBIENT_RANGE.0, AMBIENT_RANGE.1, day)
}

pub fn ambient_color(day: f32) -> Rgb {
    NIGHT_AMBIENT.lerp(Rgb::WHITE, day)
}

pub fn hemi_intensity(day: f32) -> f32 {
    lerp(HEMI_RANGE.0, HEMI_RANGE.1, day)
}

pub fn exposure(day: f32) -> f32 {
    lerp(EXPOSURE_RANGE.0, EXPOSURE_RANGE.1, day)
}

/// Collective star opacity: `max(0, 1 − 2·day)` modulated by a slow twinkle.
pub fn star_opacity(day: f32, elapsed_secs: f64) -> f32 {
    let base = (1.0 - 2.0 * day).max(0.0);
    let twinkle = 0.7 + 0.3 * (elapsed_secs * 0.5).sin() as f32;
    base * twinkle
}

/// Directional (sun) light color and intensity.
pub fn directional_light(sun_altitude: f64) -> (Rgb, f32) {
    let intensity = (sun_altitude.sin().max(0.0) * 2.0) as f32;
    let color = if sun_altitude < WARM_LIGHT_ALTITUDE {
        WARM_LIGHT
    } else {
        Rgb::WHITE
    };
    (color, intensity)
}

/// Sun disk color and scale; large and orange near the horizon.
pub fn sun_body(sun_altitude: f64) -> (Rgb, f32) {
    if sun_altitude > HORIZON_BAND.0 && sun_altitude < HORIZON_BAND.1 {
        (SUN_WARM, 1.5)
    } else {
        (SUN_PALE, 1.0)
    }
}

pub fn sun_visible(sun_altitude: f64) -> bool {
    sun_altitude > SUN_VISIBLE_ALTITUDE
}

pub fn moon_visible(moon_altitude: f64) -> bool {
    moon_altitude > MOON_VISIBLE_ALTITUDE
}
