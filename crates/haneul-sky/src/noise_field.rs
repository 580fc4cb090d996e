//! Coherent noise primitives and fractal sums over them.

use noise::{NoiseFn, Simplex};

/// Seeded simplex noise with 2D/3D sampling and fBm.
///
/// Seeded once at construction; there is no way to reseed an existing field.
/// Every sample is clamped to `[-1, 1]`.
#[derive(Clone)]
pub struct NoiseField {
    simplex: Simplex,
    seed: u32,
}

impl std::fmt::Debug for NoiseField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoiseField").field("seed", &self.seed).finish()
    }
}

impl NoiseField {
    /// Create a noise field from a seed.
    pub fn new(seed: u32) -> Self {
        Self {
            simplex: Simplex::new(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Sample 2D noise. Returns a value in `[-1, 1]`.
    pub fn noise2(&self, x: f64, y: f64) -> f32 {
        self.simplex.get([x, y]).clamp(-1.0, 1.0) as f32
    }

    /// Sample 3D noise. Returns a value in `[-1, 1]`.
    pub fn noise3(&self, x: f64, y: f64, z: f64) -> f32 {
        self.simplex.get([x, y, z]).clamp(-1.0, 1.0) as f32
    }

    /// Fractional Brownian motion over [`noise2`](Self::noise2).
    ///
    /// Each octave doubles the frequency and halves the amplitude; the sum is
    /// divided by the total amplitude so the result stays in `[-1, 1]` for
    /// any octave count. Zero octaves yields `0.0`.
    pub fn fbm(&self, x: f64, y: f64, octaves: u32) -> f32 {
        let mut value = 0.0f64;
        let mut amplitude = 1.0f64;
        let mut frequency = 1.0f64;
        let mut max_value = 0.0f64;

        for _ in 0..octaves {
            value += self.noise2(x * frequency, y * frequency) as f64 * amplitude;
            max_value += amplitude;
            amplitude *= 0.5;
            frequency *= 2.0;
        }

        if max_value == 0.0 {
            return 0.0;
        }
        (value / max_value).clamp(-1.0, 1.0) as f32
    }
}
