//! Character constants for the scene.

/// Characters used for stars.
pub const STAR_CHARS: &[char] = &['.', '*', '+', '·', '✦', '✧'];

/// Moon glyphs from new to full.
pub const MOON_CHARS: &[char] = &['○', '◔', '◑', '◕', '●'];

/// Water surface glyphs by ripple height, trough to crest.
pub const WATER_CHARS: &[char] = &[' ', '-', '~', '≈'];
