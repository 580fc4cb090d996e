//! Scene render state.

use glam::Vec3;
use haneul_core::{Rgb, VisualState};
use haneul_sky::{AstronomyProvider, Atmosphere, GridSpec, StarField, TerrainField, WaterField};
use ratatui::{Frame, layout::Rect, widgets::Paragraph};
use tracing::debug;

use crate::camera::{Camera, DEFAULT_POSITION};
use crate::canvas::{Canvas, Cell};
use crate::chars::{MOON_CHARS, STAR_CHARS, WATER_CHARS};
use crate::color::{apply_fog, shade};

/// Elevation slope over which the sky blends from bottom to top color.
const SKY_GRADIENT_SPAN: f32 = 0.5;
/// Sun disc radius in rows at scale 1.
const SUN_RADIUS_ROWS: f32 = 1.0;
/// Ray-march start depth and step growth.
const MARCH_NEAR: f32 = 1.0;
const MARCH_STEP: f32 = 0.3;
const MARCH_GROWTH: f32 = 0.02;
/// Specular exponent for sun glint on water.
const GLINT_POWER: i32 = 32;
/// Ripple offset separating the water glyph bands.
const RIPPLE_BAND: f32 = 0.12;

/// Borrowed view of everything needed to paint one frame.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub visual: &'a VisualState,
    pub terrain: &'a TerrainField,
    pub water: &'a WaterField,
    pub stars: &'a StarField,
}

impl<'a> Scene<'a> {
    pub fn from_atmosphere<P: AstronomyProvider>(
        atmosphere: &'a Atmosphere<P>,
        visual: &'a VisualState,
    ) -> Self {
        Self {
            visual,
            terrain: atmosphere.terrain(),
            water: atmosphere.water(),
            stars: atmosphere.stars(),
        }
    }
}

enum Surface {
    Ground,
    Water(f32),
}

/// Renderer state kept across frames.
#[derive(Debug)]
pub struct SceneState {
    canvas: Canvas,
    camera_position: Vec3,
    /// Terrain normals and the terrain revision they were computed for.
    normals: Vec<Vec3>,
    normals_revision: Option<u64>,
}

impl Default for SceneState {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneState {
    pub fn new() -> Self {
        Self {
            canvas: Canvas::default(),
            camera_position: DEFAULT_POSITION,
            normals: Vec::new(),
            normals_revision: None,
        }
    }

    /// Render the scene into `area`.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, scene: &Scene) {
        let canvas = self.paint(scene, area.width, area.height);
        let lines = canvas.to_lines(scene.visual.exposure);
        frame.render_widget(Paragraph::new(lines), area);
    }

    /// Paint the scene into the internal canvas and return it.
    pub fn paint(&mut self, scene: &Scene, width: u16, height: u16) -> &Canvas {
        self.canvas.resize(width, height);
        self.refresh_normals(scene.terrain);
        let camera = Camera::new(self.camera_position, width, height);
        let visual = scene.visual;

        self.paint_sky(&camera, visual);
        if visual.star_opacity > 0.0 {
            self.paint_stars(&camera, visual, scene.stars);
        }
        if visual.moon_visible {
            self.paint_moon(&camera, visual);
        }
        if visual.sun_visible {
            self.paint_sun(&camera, visual);
        }
        for column in 0..width {
            self.paint_land_column(&camera, scene, column);
        }
        &self.canvas
    }

    fn refresh_normals(&mut self, terrain: &TerrainField) {
        let revision = terrain.revision();
        if self.normals_revision == Some(revision) {
            return;
        }
        self.normals = terrain.normals();
        self.normals_revision = Some(revision);
        debug!(revision, "terrain normals recomputed");
    }

    fn normal_at(&self, spec: GridSpec, x: f32, z: f32) -> Vec3 {
        let cols = spec.columns();
        let half = spec.size / 2.0;
        let cell = spec.cell_size();
        let max = (cols - 1) as f32;
        let col = ((x + half) / cell).round().clamp(0.0, max) as usize;
        let row = ((z + half) / cell).round().clamp(0.0, max) as usize;
        self.normals
            .get(row * cols + col)
            .copied()
            .unwrap_or(Vec3::Y)
    }

    fn paint_sky(&mut self, camera: &Camera, visual: &VisualState) {
        for y in 0..self.canvas.height() {
            let t = (camera.row_elevation(y) / SKY_GRADIENT_SPAN).clamp(0.0, 1.0);
            let bg = visual.sky_bottom.lerp(visual.sky_top, t);
            for x in 0..self.canvas.width() {
                self.canvas.fill(x as i32, y as i32, bg);
            }
        }
    }

    fn paint_stars(&mut self, camera: &Camera, visual: &VisualState, stars: &StarField) {
        for (i, star) in stars.stars().iter().enumerate() {
            let Some((x, y)) = camera.project_direction(star.position) else {
                continue;
            };
            let (x, y) = (x.floor() as i32, y.floor() as i32);
            if y < 0 || y as u16 >= self.canvas.height() || x < 0 || x as u16 >= self.canvas.width()
            {
                continue;
            }
            let Some(bg) = self.canvas.get(x as u16, y as u16).map(|c| c.bg) else {
                continue;
            };
            let fg = bg.lerp(Rgb::WHITE, visual.star_opacity);
            self.canvas.put(x, y, STAR_CHARS[i % STAR_CHARS.len()], fg);
        }
    }

    fn paint_moon(&mut self, camera: &Camera, visual: &VisualState) {
        let Some((x, y)) = camera.project_direction(visual.moon_world_pos) else {
            return;
        };
        let phase = (visual.moon_illumination.clamp(0.0, 1.0) * (MOON_CHARS.len() - 1) as f32)
            .round() as usize;
        self.canvas.put(
            x.floor() as i32,
            y.floor() as i32,
            MOON_CHARS[phase],
            visual.moon_color,
        );
    }

    fn paint_sun(&mut self, camera: &Camera, visual: &VisualState) {
        let Some((cx, cy)) = camera.project_direction(visual.sun_world_pos) else {
            return;
        };
        let radius = SUN_RADIUS_ROWS * visual.sun_scale;
        let aspect = camera.cell_aspect();
        let reach_x = (radius * aspect).ceil() as i32;
        let reach_y = radius.ceil() as i32;
        let (col, row) = (cx.floor() as i32, cy.floor() as i32);

        for dy in -reach_y..=reach_y {
            for dx in -reach_x..=reach_x {
                let ox = (col + dx) as f32 + 0.5 - cx;
                let oy = (row + dy) as f32 + 0.5 - cy;
                if (ox / aspect).powi(2) + oy.powi(2) <= radius * radius {
                    self.canvas.fill(col + dx, row + dy, visual.sun_color);
                }
            }
        }
    }

    /// March one screen column front to back, filling rows from the bottom
    /// up as nearer surfaces rise above the ones already drawn.
    fn paint_land_column(&mut self, camera: &Camera, scene: &Scene, column: u16) {
        let visual = scene.visual;
        let heights = scene.terrain.current();
        let spec = heights.spec();
        let half = spec.size / 2.0;
        let slope = camera.column_slope(column);
        let eye = camera.position;

        let mut lowest = self.canvas.height() as i32;
        let mut depth = MARCH_NEAR;
        while lowest > 0 {
            let x = eye.x + slope * depth;
            let z = eye.z - depth;
            if z < -half {
                break;
            }
            if x.abs() <= half && z <= half {
                let ground = heights.sample(x, z);
                let water = scene.water.surface_height(x, z);
                let (height, surface) = if ground >= water {
                    (ground, Surface::Ground)
                } else {
                    (water, Surface::Water(water - scene.water.level()))
                };

                let top = (camera.row_for(height, depth).floor() as i32).max(0);
                if top < lowest {
                    let point = Vec3::new(x, height, z);
                    let cell = self.surface_cell(visual, spec, point, eye, surface);
                    for y in top..lowest {
                        self.canvas.set(column as i32, y, cell);
                    }
                    lowest = top;
                }
            }
            depth += MARCH_STEP + depth * MARCH_GROWTH;
        }
    }

    fn surface_cell(
        &self,
        visual: &VisualState,
        spec: GridSpec,
        point: Vec3,
        eye: Vec3,
        surface: Surface,
    ) -> Cell {
        let distance = point.distance(eye);
        match surface {
            Surface::Ground => {
                let normal = self.normal_at(spec, point.x, point.z);
                let bg = apply_fog(shade(visual.terrain_color, normal, visual), visual, distance);
                Cell { ch: ' ', fg: bg, bg }
            }
            Surface::Water(ripple) => {
                let lit = shade(visual.water_color, Vec3::Y, visual);
                let view = (point - eye).normalize_or_zero();
                let reflected = Vec3::new(view.x, -view.y, view.z);
                let sun_dir = visual.sun_world_pos.normalize_or_zero();
                let glint = reflected.dot(sun_dir).max(0.0).powi(GLINT_POWER)
                    * visual.dir_light_intensity;
                let bg = apply_fog(lit.add(visual.sun_color.scale(glint)), visual, distance);

                let band = ((ripple / RIPPLE_BAND).floor() as i32 + 1)
                    .clamp(0, WATER_CHARS.len() as i32 - 1) as usize;
                let fg = bg.lerp(visual.sky_top, 0.35);
                Cell {
                    ch: WATER_CHARS[band],
                    fg,
                    bg,
                }
            }
        }
    }
}
