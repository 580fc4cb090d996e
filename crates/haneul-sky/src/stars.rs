//! Fixed star field on the upper sky hemisphere.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Radius of the star shell; beyond the sun and moon.
pub const STAR_RADIUS: f32 = 400.0;

/// A single star. Position and phase never change after creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub position: Vec3,
    /// Oscillation phase in radians.
    pub phase: f32,
}

/// Stars generated once at startup.
///
/// Opacity is a single scalar for the whole field (see
/// [`star_opacity`](crate::star_opacity)); the per-star phase is kept for
/// renderers that want to offset it.
#[derive(Debug, Clone, PartialEq)]
pub struct StarField {
    stars: Vec<Star>,
}

impl StarField {
    /// Generate `count` stars uniformly over the upper hemisphere shell.
    pub fn generate(seed: u64, count: usize, radius: f32) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let stars = (0..count)
            .map(|_| {
                let theta = rng.random::<f32>() * TAU;
                // Uniform cos(polar angle) in (0, 1] keeps the density even.
                let cos_phi = 1.0 - rng.random::<f32>();
                let sin_phi = (1.0 - cos_phi * cos_phi).sqrt();
                let position = Vec3::new(
                    radius * sin_phi * theta.cos(),
                    radius * cos_phi,
                    radius * sin_phi * theta.sin(),
                );
                Star {
                    position,
                    phase: rng.random::<f32>() * TAU,
                }
            })
            .collect();
        Self { stars }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }
}
