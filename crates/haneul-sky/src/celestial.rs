//! Placing the sun and moon in world space.

use glam::Vec3;

/// Distance of the sun from the origin.
pub const SUN_RADIUS: f32 = 150.0;
/// Moon sits on a slightly larger shell so the two never share a depth.
pub const MOON_RADIUS: f32 = 160.0;

/// Convert altitude/azimuth (radians, azimuth from south toward west) on a
/// shell of radius `r` into world coordinates (y up, −z is south).
pub fn project(altitude: f64, azimuth: f64, radius: f32) -> Vec3 {
    let r = radius as f64;
    let ground = r * altitude.cos();
    Vec3::new(
        (-ground * azimuth.sin()) as f32,
        (r * altitude.sin()) as f32,
        (-ground * azimuth.cos()) as f32,
    )
}
