//! Time-to-sky mapping engine for the haneul clock.
//!
//! Turns a wall-clock instant and an observer location into a complete
//! [`VisualState`](haneul_core::VisualState): sky gradient, fog, terrain tint,
//! light colors and intensities, star visibility, exposure and sun/moon
//! placement. It also owns the procedural terrain and water height fields
//! that drift with elapsed time.
//!
//! Nothing here draws. A renderer consumes the [`Frame`] produced by
//! [`Atmosphere::tick`] each frame.

mod astronomy;
mod celestial;
mod error;
mod frame;
mod label;
mod lighting;
mod location;
mod noise_field;
mod palette;
mod sampler;
mod stars;
mod terrain;

pub use astronomy::{AstronomyProvider, MoonIllumination, SunCalc, SunTimes};
pub use celestial::{MOON_RADIUS, SUN_RADIUS, project};
pub use error::PaletteError;
pub use frame::{Atmosphere, Frame, SceneSettings, compute_visual};
pub use label::{format_clock, format_date, label};
pub use lighting::{
    day_amount, directional_light, fog_density, nightness, star_opacity, sun_body,
};
pub use location::{LocationCell, LocationSource};
pub use noise_field::NoiseField;
pub use palette::{DEFAULT_KEYFRAMES, Palette, SkyColors, TerrainTints};
pub use sampler::{TimeSampler, fractional_hour};
pub use stars::{Star, StarField};
pub use terrain::{GridSpec, HeightField, TerrainField, Throttle, WaterField};
