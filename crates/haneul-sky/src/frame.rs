//! Per-frame orchestration.

use chrono::{DateTime, TimeZone};
use haneul_core::{Rgb, TimeSample, VisualState};
use tracing::{debug, info};

use crate::astronomy::AstronomyProvider;
use crate::celestial::{MOON_RADIUS, SUN_RADIUS, project};
use crate::label::label;
use crate::lighting;
use crate::location::LocationCell;
use crate::noise_field::NoiseField;
use crate::palette::Palette;
use crate::sampler::TimeSampler;
use crate::stars::{STAR_RADIUS, StarField};
use crate::terrain::{GridSpec, TerrainField, WaterField};

/// Deep water color the water tint is pulled toward.
const DEEP_WATER: Rgb = Rgb::from_hex(0x0a2a4a);
const WATER_SKY_MIX: f32 = 0.5;
const MOON_COLOR: Rgb = Rgb::from_hex(0xdfe6f2);

/// Scene construction parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneSettings {
    pub terrain: GridSpec,
    pub water: GridSpec,
    pub star_count: usize,
    /// Seed for noise and star placement.
    pub seed: u32,
    /// Minimum elapsed seconds between terrain drift updates.
    pub terrain_refresh_secs: f64,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            terrain: GridSpec::new(400.0, 128),
            water: GridSpec::new(400.0, 64),
            star_count: 1500,
            seed: 0,
            terrain_refresh_secs: 0.1,
        }
    }
}

/// Output of one tick.
#[derive(Debug, Clone)]
pub struct Frame {
    pub sample: TimeSample,
    pub visual: VisualState,
    /// Next sunrise/sunset countdown.
    pub label: String,
    /// Whether terrain heights changed this tick.
    pub terrain_changed: bool,
}

/// Derive the visual state from a time sample.
///
/// Pure: depends only on the palette, the sample and elapsed seconds.
pub fn compute_visual(palette: &Palette, sample: &TimeSample, elapsed_secs: f64) -> VisualState {
    let h = sample.fractional_hour;
    let sky = palette.sky_colors(h);
    let terrain_color = palette.terrain_color(h);
    let day = lighting::day_amount(h);

    let (dir_light_color, dir_light_intensity) = lighting::directional_light(sample.sun.altitude);
    let (sun_color, sun_scale) = lighting::sun_body(sample.sun.altitude);

    VisualState {
        sky_top: sky.top,
        sky_bottom: sky.bottom,
        terrain_color,
        water_color: sky.bottom.lerp(DEEP_WATER, WATER_SKY_MIX),
        fog_color: sky.bottom,
        fog_density: lighting::fog_density(h),

        dir_light_color,
        dir_light_intensity,
        ambient_color: lighting::ambient_color(day),
        ambient_intensity: lighting::ambient_intensity(day),
        hemi_top_color: sky.top,
        hemi_bottom_color: terrain_color,
        hemi_intensity: lighting::hemi_intensity(day),

        star_opacity: lighting::star_opacity(day, elapsed_secs),
        exposure: lighting::exposure(day),
        day_amount: day,
        nightness: lighting::nightness(h),

        sun_world_pos: project(sample.sun.altitude, sample.sun.azimuth, SUN_RADIUS),
        sun_visible: lighting::sun_visible(sample.sun.altitude),
        sun_scale,
        sun_color,

        moon_world_pos: project(sample.moon.altitude, sample.moon.azimuth, MOON_RADIUS),
        moon_visible: lighting::moon_visible(sample.moon.altitude),
        moon_color: MOON_COLOR.scale(0.4 + 0.6 * sample.moon_illumination),
        moon_illumination: sample.moon_illumination,
    }
}

/// The whole atmospheric scene: palette, noise, terrain, water and stars.
///
/// Owned by the frame loop; [`tick`](Self::tick) is the only mutator.
#[derive(Debug)]
pub struct Atmosphere<P> {
    sampler: TimeSampler<P>,
    palette: Palette,
    noise: NoiseField,
    terrain: TerrainField,
    water: WaterField,
    stars: StarField,
}

impl<P: AstronomyProvider> Atmosphere<P> {
    pub fn new(
        provider: P,
        location: LocationCell,
        palette: Palette,
        settings: SceneSettings,
    ) -> Self {
        let noise = NoiseField::new(settings.seed);
        let terrain = TerrainField::new(&noise, settings.terrain, settings.terrain_refresh_secs);
        let water = WaterField::new(settings.water);
        let stars = StarField::generate(settings.seed as u64, settings.star_count, STAR_RADIUS);

        info!(
            seed = settings.seed,
            terrain_segments = settings.terrain.segments,
            water_segments = settings.water.segments,
            stars = stars.len(),
            "atmosphere initialized"
        );

        Self {
            sampler: TimeSampler::new(provider, location),
            palette,
            noise,
            terrain,
            water,
            stars,
        }
    }

    /// Advance one frame.
    ///
    /// `elapsed_secs` is an accumulator independent of wall time; it drives
    /// the twinkle, terrain drift and water ripples.
    pub fn tick<Tz: TimeZone>(&mut self, now: &DateTime<Tz>, elapsed_secs: f64) -> Frame {
        let location = self.sampler.location();
        let sample = self.sampler.sample_at(now, location);
        let visual = compute_visual(&self.palette, &sample, elapsed_secs);
        let label = label(
            now,
            sample.sunrise,
            sample.sunset,
            self.sampler.provider(),
            location,
        );

        let terrain_changed = self.terrain.advance(&self.noise, elapsed_secs);
        self.water.advance(&self.noise, elapsed_secs);

        if terrain_changed {
            debug!(revision = self.terrain.revision(), "terrain drift updated");
        }

        Frame {
            sample,
            visual,
            label,
            terrain_changed,
        }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn terrain(&self) -> &TerrainField {
        &self.terrain
    }

    pub fn water(&self) -> &WaterField {
        &self.water
    }

    pub fn stars(&self) -> &StarField {
        &self.stars
    }

    pub fn location_cell(&self) -> &LocationCell {
        self.sampler.location_cell()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::astronomy::SunCalc;
    use chrono::FixedOffset;
    use haneul_core::{Horizontal, Location};

    fn sample_at(hour: f32, sun_alt: f64, moon_alt: f64) -> TimeSample {
        let instant = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2026, 10, 17, 0, 0, 0)
            .unwrap();
        TimeSample {
            instant,
            fractional_hour: hour,
            sun: Horizontal {
                altitude: sun_alt,
                azimuth: 0.0,
            },
            moon: Horizontal {
                altitude: moon_alt,
                azimuth: std::f64::consts::PI,
            },
            moon_illumination: 1.0,
            sunrise: None,
            sunset: None,
        }
    }

    fn small_settings() -> SceneSettings {
        SceneSettings {
            terrain: GridSpec::new(100.0, 16),
            water: GridSpec::new(100.0, 8),
            star_count: 50,
            seed: 17,
            terrain_refresh_secs: 0.1,
        }
    }

    #[test]
    fn test_midday_visual() {
        let palette = Palette::default();
        let v = compute_visual(&palette, &sample_at(12.0, 1.0, -0.5), 0.0);
        assert!((v.ambient_intensity - 0.3).abs() < 1e-6);
        assert!((v.hemi_intensity - 0.4).abs() < 1e-6);
        assert!((v.exposure - 1.2).abs() < 1e-6);
        assert_eq!(v.star_opacity, 0.0);
        assert!(v.sun_visible);
        assert!(!v.moon_visible);
        assert_eq!(v.dir_light_color, Rgb::WHITE);
        assert_eq!(v.fog_color, v.sky_bottom);
        assert_eq!(v.hemi_top_color, v.sky_top);
    }

    #[test]
    fn test_night_visual() {
        let palette = Palette::default();
        let v = compute_visual(&palette, &sample_at(2.0, -0.8, 0.6), std::f64::consts::PI);
        assert!((v.ambient_intensity - 0.05).abs() < 1e-6);
        assert!((v.exposure - 0.5).abs() < 1e-6);
        assert!((v.star_opacity - 1.0).abs() < 1e-6);
        assert_eq!(v.dir_light_intensity, 0.0);
        assert!(!v.sun_visible);
        assert!(v.moon_visible);
        assert!(v.moon_world_pos.y > 0.0);
    }

    #[test]
    fn test_sun_placement_and_water_tint() {
        let palette = Palette::default();
        let v = compute_visual(&palette, &sample_at(6.5, 0.0, -0.1), 0.0);
        assert!((v.sun_world_pos - glam::Vec3::new(0.0, 0.0, -SUN_RADIUS)).length() < 1e-3);
        assert_eq!(v.sun_scale, 1.5);
        assert_eq!(v.water_color, v.sky_bottom.lerp(DEEP_WATER, 0.5));
    }

    #[test]
    fn test_compute_visual_is_pure() {
        let palette = Palette::default();
        let s = sample_at(17.25, 0.12, 0.3);
        assert_eq!(compute_visual(&palette, &s, 9.5), compute_visual(&palette, &s, 9.5));
    }

    #[test]
    fn test_tick() {
        let mut atmosphere = Atmosphere::new(
            SunCalc,
            LocationCell::configured(Location::new(37.5665, 126.978)),
            Palette::default(),
            small_settings(),
        );
        let now = FixedOffset::east_opt(9 * 3600)
            .unwrap()
            .with_ymd_and_hms(2026, 10, 17, 13, 0, 0)
            .unwrap();

        let first = atmosphere.tick(&now, 0.0);
        assert!(first.terrain_changed);
        assert!(first.visual.sun_visible);
        assert!(first.label.starts_with("sunset in"));
        assert_eq!(first.sample.fractional_hour, 13.0);

        let second = atmosphere.tick(&now, 0.016);
        assert!(!second.terrain_changed);
        assert_eq!(atmosphere.terrain().revision(), 1);
        assert_eq!(atmosphere.stars().len(), 50);
    }

    #[test]
    fn test_terrain_drift_throttled_at_frame_rate() {
        let mut atmosphere = Atmosphere::new(
            SunCalc,
            LocationCell::configured(Location::new(37.5665, 126.978)),
            Palette::default(),
            small_settings(),
        );
        let now = FixedOffset::east_opt(9 * 3600)
            .unwrap()
            .with_ymd_and_hms(2026, 10, 17, 13, 0, 0)
            .unwrap();

        // 30 frames at ~60 Hz span 0.464 s: drift lands at 0, 0.112, 0.224, 0.336, 0.448.
        let changed = (0..30)
            .filter(|&i| atmosphere.tick(&now, i as f64 * 0.016).terrain_changed)
            .count();
        assert_eq!(changed, 5);
        assert_eq!(atmosphere.terrain().revision(), 5);
    }

    #[test]
    fn test_same_seed_same_scene() {
        let a = Atmosphere::new(SunCalc, LocationCell::default(), Palette::default(), small_settings());
        let b = Atmosphere::new(SunCalc, LocationCell::default(), Palette::default(), small_settings());
        assert_eq!(a.terrain().base(), b.terrain().base());
        assert_eq!(a.stars(), b.stars());
    }
}
