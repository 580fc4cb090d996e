//! Renderer-facing visual state.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::Rgb;

/// One row of the sky palette table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorKeyframe {
    /// Hour of day in `[0, 24]`.
    pub hour: f32,
    /// Zenith color.
    pub top: Rgb,
    /// Horizon color.
    pub bottom: Rgb,
}

impl ColorKeyframe {
    pub const fn new(hour: f32, top: Rgb, bottom: Rgb) -> Self {
        Self { hour, top, bottom }
    }
}

/// Fully resolved look of a single frame.
///
/// A snapshot with no identity beyond the frame it was computed for.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualState {
    pub sky_top: Rgb,
    pub sky_bottom: Rgb,
    pub terrain_color: Rgb,
    pub water_color: Rgb,
    pub fog_color: Rgb,
    pub fog_density: f32,

    pub dir_light_color: Rgb,
    pub dir_light_intensity: f32,
    pub ambient_color: Rgb,
    pub ambient_intensity: f32,
    pub hemi_top_color: Rgb,
    pub hemi_bottom_color: Rgb,
    pub hemi_intensity: f32,

    /// Collective opacity shared by every star.
    pub star_opacity: f32,
    pub exposure: f32,
    /// How much of full daylight is present, `[0, 1]`.
    pub day_amount: f32,
    /// Fog-driving night factor, `[-1, 1]`.
    pub nightness: f32,

    pub sun_world_pos: Vec3,
    pub sun_visible: bool,
    pub sun_scale: f32,
    pub sun_color: Rgb,

    pub moon_world_pos: Vec3,
    pub moon_visible: bool,
    pub moon_color: Rgb,
    pub moon_illumination: f32,
}
