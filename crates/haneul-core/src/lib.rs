//! Core types shared by the haneul crates.
//!
//! Everything here is plain data: colors, locations, the per-frame time
//! sample and the visual state handed to a renderer, plus the easing helpers
//! every day-phase blend is built from.

mod color;
mod location;
mod math;
mod sample;
mod time_format;
mod visual;

pub use color::Rgb;
pub use location::{DEFAULT_LOCATION, Location};
pub use math::{lerp, smoothstep};
pub use sample::{Horizontal, TimeSample};
pub use time_format::TimeFormat;
pub use visual::{ColorKeyframe, VisualState};
