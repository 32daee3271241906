//! Two-color palette mapping picks to pixels

use crate::io::configuration::{GROUND_COLOR, OVERSHOT_COLOR};
use crate::io::error::{Result, invalid_argument};
use image::Rgba;

/// Colors for lowered (0) and raised (1) threads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Color of pick 0
    pub ground: [u8; 4],
    /// Color of pick 1
    pub overshot: [u8; 4],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            ground: GROUND_COLOR,
            overshot: OVERSHOT_COLOR,
        }
    }
}

impl Palette {
    /// Build a palette from two opaque RGB triples
    pub const fn from_rgb(ground: [u8; 3], overshot: [u8; 3]) -> Self {
        Self {
            ground: [ground[0], ground[1], ground[2], 255],
            overshot: [overshot[0], overshot[1], overshot[2], 255],
        }
    }

    /// Pixel for a pick value; anything non-zero counts as raised
    pub const fn color_for(&self, pick: u8) -> Rgba<u8> {
        if pick == 0 {
            Rgba(self.ground)
        } else {
            Rgba(self.overshot)
        }
    }
}

/// Parse `#rrggbb` or `rrggbb` into an opaque RGBA color
///
/// # Errors
///
/// Returns `InvalidArgument` unless the input holds exactly six hex digits
pub fn parse_hex_color(input: &str) -> Result<[u8; 4]> {
    let digits = input.trim().trim_start_matches('#');
    let reject = || invalid_argument("color", &input, &"expected six hex digits like #e6d98a");

    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(reject());
    }

    let channel = |range: std::ops::Range<usize>| {
        digits
            .get(range)
            .and_then(|pair| u8::from_str_radix(pair, 16).ok())
            .ok_or_else(reject)
    };

    Ok([channel(0..2)?, channel(2..4)?, channel(4..6)?, 255])
}
