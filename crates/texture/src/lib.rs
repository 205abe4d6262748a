//! Procedural pattern textures: deterministic pixel-buffer generation.
//!
//! # Invariants
//! - `generate` is a pure function of its inputs; equal inputs yield
//!   byte-identical buffers.
//! - Every produced buffer is RGBA8, row-major, length `4 * width * height`.
//! - Alpha is 255 for every pixel; red, green, and blue are always equal
//!   (grayscale patterns).
//! - `PatternKind::None` produces no buffer at all; the caller falls back
//!   to its flat material color.

use serde::{Deserialize, Serialize};

/// Grayscale value of a "light" block.
const LIGHT: u8 = 255;
/// Grayscale value of a "dark" block.
const DARK: u8 = 100;

/// Which procedural fill rule to apply.
///
/// The domain is closed: there is no invalid-kind case to handle at
/// runtime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    /// No texture; the surface shows its flat color only.
    #[default]
    None,
    /// Alternating light/dark square blocks.
    Checkered,
    /// Horizontal light/dark bands, one block tall.
    Striped,
}

impl PatternKind {
    /// All kinds, in UI presentation order.
    pub const ALL: [Self; 3] = [Self::None, Self::Checkered, Self::Striped];

    /// Human-readable label for UI display.
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Checkered => "Checkered",
            Self::Striped => "Striped",
        }
    }
}

/// Generation parameters: texture edge length and block size, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureOptions {
    /// Texture width and height (textures are square).
    pub size: u32,
    /// Edge length of one light/dark block.
    pub block: u32,
}

impl Default for TextureOptions {
    fn default() -> Self {
        Self { size: 64, block: 8 }
    }
}

/// A generated texture: RGBA8 pixels plus dimensions.
///
/// Opaque to the generator's caller; ownership passes to the rendering
/// layer for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA8 data, length `4 * width * height`.
    pub pixels: Vec<u8>,
}

impl TextureImage {
    /// Channels of the pixel at `(x, y)` as `[r, g, b, a]`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let offset = 4 * (y as usize * self.width as usize + x as usize);
        [
            self.pixels[offset],
            self.pixels[offset + 1],
            self.pixels[offset + 2],
            self.pixels[offset + 3],
        ]
    }
}

/// Generate the pattern texture for `kind`.
///
/// Returns `None` for [`PatternKind::None`]; otherwise a fully populated
/// [`TextureImage`] of `options.size` squared. Deterministic: two calls
/// with equal arguments produce byte-identical buffers, so callers may
/// memoize by kind and options alone.
pub fn generate(kind: PatternKind, options: &TextureOptions) -> Option<TextureImage> {
    let fill = match kind {
        PatternKind::None => return None,
        PatternKind::Checkered => checkered,
        PatternKind::Striped => striped,
    };

    let (size, block) = (options.size, options.block.max(1));
    let mut pixels = Vec::with_capacity(buffer_len(size));
    for y in 0..size {
        for x in 0..size {
            let value = if fill(x, y, block) { LIGHT } else { DARK };
            pixels.extend_from_slice(&[value, value, value, 255]);
        }
    }

    Some(TextureImage {
        width: size,
        height: size,
        pixels,
    })
}

/// Generate with the default 64px / 8px-block options.
pub fn generate_default(kind: PatternKind) -> Option<TextureImage> {
    generate(kind, &TextureOptions::default())
}

/// RGBA8 buffer length for a square texture of edge `size`.
///
/// Computed in `usize` so large configured sizes cannot overflow the
/// 32-bit pixel count.
fn buffer_len(size: u32) -> usize {
    4 * size as usize * size as usize
}

/// Checkerboard parity over block coordinates.
fn checkered(x: u32, y: u32, block: u32) -> bool {
    (x / block + y / block) % 2 == 0
}

/// Horizontal-band parity; the degenerate checkerboard that ignores `x`.
fn striped(_x: u32, y: u32, block: u32) -> bool {
    (y / block) % 2 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [u8; 4] = [255, 255, 255, 255];
    const GRAY: [u8; 4] = [100, 100, 100, 255];

    #[test]
    fn none_produces_no_texture() {
        assert!(generate_default(PatternKind::None).is_none());
    }

    #[test]
    fn buffer_length_matches_dimensions() {
        for kind in [PatternKind::Checkered, PatternKind::Striped] {
            let img = generate_default(kind).unwrap();
            assert_eq!(img.width, 64);
            assert_eq!(img.height, 64);
            assert_eq!(img.pixels.len(), 4 * 64 * 64);
        }
    }

    #[test]
    fn all_pixels_opaque_grayscale() {
        for kind in [PatternKind::Checkered, PatternKind::Striped] {
            let img = generate_default(kind).unwrap();
            for px in img.pixels.chunks_exact(4) {
                assert_eq!(px[3], 255);
                assert_eq!(px[0], px[1]);
                assert_eq!(px[1], px[2]);
            }
        }
    }

    #[test]
    fn generation_is_deterministic() {
        let a = generate_default(PatternKind::Checkered).unwrap();
        let b = generate_default(PatternKind::Checkered).unwrap();
        assert_eq!(a.pixels, b.pixels);
    }

    #[test]
    fn checkered_block_corners() {
        let img = generate_default(PatternKind::Checkered).unwrap();
        assert_eq!(img.pixel(0, 0), WHITE);
        assert_eq!(img.pixel(8, 0), GRAY);
        assert_eq!(img.pixel(0, 8), GRAY);
        assert_eq!(img.pixel(8, 8), WHITE);
    }

    #[test]
    fn checkered_uniform_within_block() {
        let img = generate_default(PatternKind::Checkered).unwrap();
        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(img.pixel(x, y), WHITE);
            }
        }
    }

    #[test]
    fn striped_rows_ignore_x() {
        let img = generate_default(PatternKind::Striped).unwrap();
        for x in 0..64 {
            assert_eq!(img.pixel(x, 0), WHITE);
            assert_eq!(img.pixel(x, 8), GRAY);
        }
    }

    #[test]
    fn custom_options_respected() {
        let opts = TextureOptions { size: 16, block: 4 };
        let img = generate(PatternKind::Checkered, &opts).unwrap();
        assert_eq!(img.pixels.len(), 4 * 16 * 16);
        assert_eq!(img.pixel(0, 0), WHITE);
        assert_eq!(img.pixel(4, 0), GRAY);
        assert_eq!(img.pixel(4, 4), WHITE);
    }

    #[test]
    fn buffer_len_survives_large_sizes() {
        // 4 * 32768^2 is exactly 2^32 and 46341^2 exceeds u32; both must
        // produce the correct usize length, not a wrapped 32-bit product.
        assert_eq!(buffer_len(32768), 4 * 32768 * 32768);
        assert_eq!(buffer_len(46341), 4 * 46341 * 46341);
        assert_eq!(buffer_len(64), 4 * 64 * 64);
    }

    #[test]
    fn zero_block_does_not_divide_by_zero() {
        let opts = TextureOptions { size: 8, block: 0 };
        // Clamped to 1px blocks rather than panicking.
        let img = generate(PatternKind::Checkered, &opts).unwrap();
        assert_eq!(img.pixel(0, 0), WHITE);
        assert_eq!(img.pixel(1, 0), GRAY);
    }
}
