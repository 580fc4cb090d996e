//! Pinhole camera mapping world space onto terminal cells.

use glam::Vec3;

/// Eye position, above the highest possible terrain, looking down −Z.
pub const DEFAULT_POSITION: Vec3 = Vec3::new(0.0, 24.0, 90.0);

/// Screen fraction (from the top) where the horizon sits.
const HORIZON_FRACTION: f32 = 0.62;
/// Focal length as a fraction of the viewport height.
const FOCAL_FRACTION: f32 = 0.9;
/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f32 = 2.0;
/// Points closer than this are clipped.
const NEAR: f32 = 0.1;

/// A level camera with no pitch or roll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    width: f32,
    focal: f32,
    horizon_row: f32,
}

impl Camera {
    pub fn new(position: Vec3, width: u16, height: u16) -> Self {
        let height = height.max(1) as f32;
        Self {
            position,
            width: width as f32,
            focal: height * FOCAL_FRACTION,
            horizon_row: height * HORIZON_FRACTION,
        }
    }

    /// Fractional row of the horizon line.
    pub fn horizon_row(&self) -> f32 {
        self.horizon_row
    }

    /// Screen `(column, row)` of a world point, or `None` behind the camera.
    pub fn project(&self, point: Vec3) -> Option<(f32, f32)> {
        let rel = point - self.position;
        let depth = -rel.z;
        if depth <= NEAR {
            return None;
        }
        Some((
            self.width / 2.0 + rel.x / depth * self.focal * CELL_ASPECT,
            self.horizon_row - rel.y / depth * self.focal,
        ))
    }

    /// Screen position of a direction at infinity (no parallax).
    pub fn project_direction(&self, dir: Vec3) -> Option<(f32, f32)> {
        let depth = -dir.z;
        if depth <= 0.0 {
            return None;
        }
        Some((
            self.width / 2.0 + dir.x / depth * self.focal * CELL_ASPECT,
            self.horizon_row - dir.y / depth * self.focal,
        ))
    }

    /// World X offset per unit of depth through the centre of `column`.
    pub fn column_slope(&self, column: u16) -> f32 {
        (column as f32 + 0.5 - self.width / 2.0) / (self.focal * CELL_ASPECT)
    }

    /// Fractional row at which height `y` appears at `depth`.
    pub fn row_for(&self, y: f32, depth: f32) -> f32 {
        self.horizon_row - (y - self.position.y) / depth.max(NEAR) * self.focal
    }

    /// Tangent of the view elevation through the centre of `row`.
    pub fn row_elevation(&self, row: u16) -> f32 {
        (self.horizon_row - (row as f32 + 0.5)) / self.focal
    }

    /// Horizontal stretch applied to screen-space radii.
    pub fn cell_aspect(&self) -> f32 {
        CELL_ASPECT
    }
}
