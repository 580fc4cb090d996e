//! Procedural terrain and water height fields.
//!
//! Grids live in the local XZ plane centred on the origin. Terrain keeps an
//! immutable base relief generated once from fBm and layers a slow 3D-noise
//! drift over it; water is fully animated every frame.

use glam::Vec3;
use tracing::debug;

use crate::noise_field::NoiseField;

const FBM_OCTAVES: u32 = 5;

/// Broad relief: frequency and height.
const COARSE_SCALE: f64 = 0.008;
const COARSE_HEIGHT: f32 = 18.0;
/// Fine relief layered on top.
const FINE_SCALE: f64 = 0.02;
const FINE_HEIGHT: f32 = 5.0;

const DRIFT_SCALE: f64 = 0.01;
const DRIFT_SPEED: f64 = 0.02;
const DRIFT_HEIGHT: f32 = 0.3;

const RIPPLE_SCALE: f64 = 0.03;
const RIPPLE_SPEED: f64 = 0.5;
const RIPPLE_HEIGHT: f32 = 0.4;

/// Resting height of the water plane.
pub const WATER_LEVEL: f32 = -2.0;

/// Square grid topology: side length in world units and segments per side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    pub size: f32,
    pub segments: u32,
}

impl GridSpec {
    /// A grid with at least one segment per side.
    pub fn new(size: f32, segments: u32) -> Self {
        Self {
            size,
            segments: segments.max(1),
        }
    }

    /// Vertices per side.
    pub fn columns(&self) -> usize {
        self.segments as usize + 1
    }

    /// Total vertex count.
    pub fn len(&self) -> usize {
        self.columns() * self.columns()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn cell_size(&self) -> f32 {
        self.size / self.segments as f32
    }

    /// Local plane coordinates `(x, z)` of a vertex.
    pub fn vertex(&self, row: usize, col: usize) -> (f32, f32) {
        let half = self.size / 2.0;
        let cell = self.cell_size();
        (col as f32 * cell - half, row as f32 * cell - half)
    }

    /// Iterate `(index, x, z)` over every vertex in row-major order.
    pub fn vertices(&self) -> impl Iterator<Item = (usize, f32, f32)> + '_ {
        let cols = self.columns();
        (0..self.len()).map(move |i| {
            let (x, z) = self.vertex(i / cols, i % cols);
            (i, x, z)
        })
    }
}

/// Row-major grid of height samples.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightField {
    spec: GridSpec,
    heights: Vec<f32>,
}

impl HeightField {
    /// Build a field by evaluating `f(x, z)` at every vertex.
    pub fn from_fn(spec: GridSpec, f: impl Fn(f32, f32) -> f32) -> Self {
        let heights = spec.vertices().map(|(_, x, z)| f(x, z)).collect();
        Self { spec, heights }
    }

    pub fn flat(spec: GridSpec) -> Self {
        Self {
            spec,
            heights: vec![0.0; spec.len()],
        }
    }

    pub fn spec(&self) -> GridSpec {
        self.spec
    }

    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.heights[row * self.spec.columns() + col]
    }

    /// Bilinear height at local plane coordinates, clamped to the grid edge.
    pub fn sample(&self, x: f32, z: f32) -> f32 {
        let cols = self.spec.columns();
        let half = self.spec.size / 2.0;
        let cell = self.spec.cell_size();
        let max = (cols - 1) as f32;

        let gx = ((x + half) / cell).clamp(0.0, max);
        let gz = ((z + half) / cell).clamp(0.0, max);
        let (c0, r0) = (gx.floor() as usize, gz.floor() as usize);
        let (c1, r1) = ((c0 + 1).min(cols - 1), (r0 + 1).min(cols - 1));
        let (tx, tz) = (gx - c0 as f32, gz - r0 as f32);

        let top = self.get(r0, c0) + (self.get(r0, c1) - self.get(r0, c0)) * tx;
        let bottom = self.get(r1, c0) + (self.get(r1, c1) - self.get(r1, c0)) * tx;
        top + (bottom - top) * tz
    }

    /// Per-vertex unit normals from central differences (one-sided at edges).
    pub fn normals(&self) -> Vec<Vec3> {
        let cols = self.spec.columns();
        let cell = self.spec.cell_size();
        let mut normals = Vec::with_capacity(self.heights.len());

        for row in 0..cols {
            for col in 0..cols {
                let (cl, cr) = (col.saturating_sub(1), (col + 1).min(cols - 1));
                let (ru, rd) = (row.saturating_sub(1), (row + 1).min(cols - 1));

                let span_x = (cr - cl).max(1) as f32 * cell;
                let span_z = (rd - ru).max(1) as f32 * cell;
                let slope_x = (self.get(row, cr) - self.get(row, cl)) / span_x;
                let slope_z = (self.get(rd, col) - self.get(ru, col)) / span_z;

                normals.push(Vec3::new(-slope_x, 1.0, -slope_z).normalize());
            }
        }
        normals
    }

    fn fill(&mut self, f: impl Fn(usize, f32, f32) -> f32) {
        let spec = self.spec;
        for (i, x, z) in spec.vertices() {
            self.heights[i] = f(i, x, z);
        }
    }
}

/// Fires at most once per interval of elapsed time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Throttle {
    interval: f64,
    last: Option<f64>,
}

impl Throttle {
    pub fn new(interval_secs: f64) -> Self {
        Self {
            interval: interval_secs.max(0.0),
            last: None,
        }
    }

    /// Returns `true` and arms the next interval if enough time has passed.
    /// A clock that runs backwards fires immediately.
    pub fn ready(&mut self, elapsed: f64) -> bool {
        let fire = match self.last {
            None => true,
            Some(last) => elapsed < last || elapsed - last >= self.interval,
        };
        if fire {
            self.last = Some(elapsed);
        }
        fire
    }
}

fn base_height(noise: &NoiseField, x: f32, z: f32) -> f32 {
    let (x, z) = (x as f64, z as f64);
    noise.fbm(x * COARSE_SCALE, z * COARSE_SCALE, FBM_OCTAVES) * COARSE_HEIGHT
        + noise.fbm(x * FINE_SCALE, z * FINE_SCALE, FBM_OCTAVES) * FINE_HEIGHT
}

/// Landscape height field with time drift.
#[derive(Debug, Clone)]
pub struct TerrainField {
    base: HeightField,
    current: HeightField,
    throttle: Throttle,
    revision: u64,
}

impl TerrainField {
    /// Generate the base relief. `refresh_secs` throttles drift updates.
    pub fn new(noise: &NoiseField, spec: GridSpec, refresh_secs: f64) -> Self {
        let base = HeightField::from_fn(spec, |x, z| base_height(noise, x, z));
        debug!(
            vertices = spec.len(),
            segments = spec.segments,
            seed = noise.seed(),
            "generated terrain base"
        );
        Self {
            current: base.clone(),
            base,
            throttle: Throttle::new(refresh_secs),
            revision: 0,
        }
    }

    /// Immutable base relief.
    pub fn base(&self) -> &HeightField {
        &self.base
    }

    /// Base plus current drift.
    pub fn current(&self) -> &HeightField {
        &self.current
    }

    /// Bumped every time [`current`](Self::current) changes; consumers
    /// recompute normals when it moves.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Recompute drift if the throttle allows. Returns whether heights changed.
    pub fn advance(&mut self, noise: &NoiseField, elapsed_secs: f64) -> bool {
        if !self.throttle.ready(elapsed_secs) {
            return false;
        }
        self.recompute(noise, elapsed_secs);
        true
    }

    /// Unconditionally recompute drift for `elapsed_secs`.
    pub fn recompute(&mut self, noise: &NoiseField, elapsed_secs: f64) {
        let base = &self.base.heights;
        let t = elapsed_secs * DRIFT_SPEED;
        self.current.fill(|i, x, z| {
            base[i]
                + noise.noise3(x as f64 * DRIFT_SCALE, z as f64 * DRIFT_SCALE, t) * DRIFT_HEIGHT
        });
        self.revision = self.revision.wrapping_add(1);
    }

    pub fn normals(&self) -> Vec<Vec3> {
        self.current.normals()
    }
}

/// Animated water ripple field.
#[derive(Debug, Clone)]
pub struct WaterField {
    ripples: HeightField,
    level: f32,
}

impl WaterField {
    pub fn new(spec: GridSpec) -> Self {
        Self {
            ripples: HeightField::flat(spec),
            level: WATER_LEVEL,
        }
    }

    /// Recompute every ripple for `elapsed_secs`.
    pub fn advance(&mut self, noise: &NoiseField, elapsed_secs: f64) {
        let t = elapsed_secs * RIPPLE_SPEED;
        self.ripples.fill(|_, x, z| {
            noise.noise3(x as f64 * RIPPLE_SCALE, z as f64 * RIPPLE_SCALE, t) * RIPPLE_HEIGHT
        });
    }

    /// Ripple offsets relative to the water level.
    pub fn ripples(&self) -> &HeightField {
        &self.ripples
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    /// Absolute water surface height at local plane coordinates.
    pub fn surface_height(&self, x: f32, z: f32) -> f32 {
        self.level + self.ripples.sample(x, z)
    }
}
