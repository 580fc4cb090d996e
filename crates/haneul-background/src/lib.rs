//! Terminal rendering of the haneul sky scene.
//!
//! Paints the [`VisualState`](haneul_core::VisualState) produced by the sky
//! engine into terminal cells: a vertical sky gradient with stars, the sun
//! and moon, and a voxel-style landscape silhouette with water, lit by the
//! scene lights and faded into fog with distance.

mod camera;
mod canvas;
mod chars;
mod color;
mod state;

pub use camera::Camera;
pub use canvas::{Canvas, Cell};
pub use color::{apply_fog, fog_factor, shade, to_color};
pub use state::{Scene, SceneState};
