//! Color utility functions for scene rendering.

use glam::Vec3;
use haneul_core::{Rgb, VisualState};
use ratatui::style::Color;

/// Fraction of moonlight relative to the moon's tint.
const MOONLIGHT: f32 = 0.15;

/// Apply exposure and quantize to a terminal color.
pub fn to_color(rgb: Rgb, exposure: f32) -> Color {
    let (r, g, b) = rgb.scale(exposure).to_u8();
    Color::Rgb(r, g, b)
}

/// Exponential-squared fog: `1 − exp(−(density·distance)²)`.
pub fn fog_factor(density: f32, distance: f32) -> f32 {
    let d = density * distance.max(0.0);
    (1.0 - (-d * d).exp()).clamp(0.0, 1.0)
}

/// Blend `color` toward the fog color for a surface at `distance`.
pub fn apply_fog(color: Rgb, visual: &VisualState, distance: f32) -> Rgb {
    color.lerp(visual.fog_color, fog_factor(visual.fog_density, distance))
}

/// Light a surface of `base` color with unit `normal` by the scene lights.
pub fn shade(base: Rgb, normal: Vec3, visual: &VisualState) -> Rgb {
    let ambient = visual.ambient_color.scale(visual.ambient_intensity);
    let hemi = visual
        .hemi_bottom_color
        .lerp(visual.hemi_top_color, normal.y * 0.5 + 0.5)
        .scale(visual.hemi_intensity);

    let sun_dir = visual.sun_world_pos.normalize_or_zero();
    let diffuse = normal.dot(sun_dir).max(0.0);
    let direct = visual
        .dir_light_color
        .scale(visual.dir_light_intensity * diffuse);

    let mut light = ambient.add(hemi).add(direct);
    if visual.moon_visible {
        let moon_dir = visual.moon_world_pos.normalize_or_zero();
        let moon = normal.dot(moon_dir).max(0.0) * MOONLIGHT;
        light = light.add(visual.moon_color.scale(moon));
    }
    base.modulate(light)
}
