//! Text and raster renderings of a sieve.
//!
//! Both lay indices `0..=limit` out row-major on a square grid whose side is
//! `floor(sqrt(limit + 1))`. The text form keeps every index (the last row
//! may be short); the raster form is exactly `side × side` pixels, so
//! indices past `side² - 1` are not drawn.

use tracing::debug;

use crate::error::{SieveError, SieveResult};
use crate::sieve::Sieve;
use crate::types::{RenderedImage, Visualization, VisualizationFormat};

/// Glyph for a prime index.
pub const FILLED_GLYPH: char = '█';
/// Glyph for a non-prime index.
pub const EMPTY_GLYPH: char = '░';

const BACKGROUND: u8 = 0xFF;
const INK: u8 = 0x00;

/// Side of the square grid for a table of `len` entries: `floor(sqrt(len))`.
pub fn grid_side(len: usize) -> usize {
    let mut side = (len as f64).sqrt() as usize;
    while side.saturating_mul(side) > len {
        side -= 1;
    }
    while (side + 1).saturating_mul(side + 1) <= len {
        side += 1;
    }
    side
}

/// Square 8-bit grayscale canvas, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    side: u32,
    pixels: Vec<u8>,
}

impl Bitmap {
    pub fn side(&self) -> u32 {
        self.side
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// True when the pixel at `(x, y)` is drawn dark.
    pub fn is_ink(&self, x: u32, y: u32) -> bool {
        if x >= self.side || y >= self.side {
            return false;
        }
        self.pixels[(y as usize) * (self.side as usize) + x as usize] == INK
    }
}

/// Renders a [`Sieve`] as glyph text or as a PNG image.
#[derive(Clone, Copy, Debug, Default)]
pub struct VisualizationRenderer;

impl VisualizationRenderer {
    /// Render `sieve` in `format`.
    pub fn render(sieve: &Sieve, format: VisualizationFormat) -> SieveResult<Visualization> {
        let rendered = match format {
            VisualizationFormat::Text => Visualization::Text(Self::render_text(sieve)),
            VisualizationFormat::Base64Image => {
                Visualization::Base64(Self::render_image(sieve)?.to_base64())
            }
            VisualizationFormat::BinaryImage => Visualization::Binary(Self::render_image(sieve)?),
        };
        debug!(limit = sieve.limit(), %format, "sieve rendered");
        Ok(rendered)
    }

    /// One glyph per index, a line break after every `side` glyphs, no
    /// trailing newline.
    pub fn render_text(sieve: &Sieve) -> String {
        let len = sieve.len();
        let side = grid_side(len).max(1);
        let mut out = String::with_capacity(len * FILLED_GLYPH.len_utf8() + len / side);

        for index in 0..len {
            if index > 0 && index % side == 0 {
                out.push('\n');
            }
            out.push(if sieve.is_prime(index as u64) {
                FILLED_GLYPH
            } else {
                EMPTY_GLYPH
            });
        }
        out
    }

    /// Light canvas with a dark pixel at `(x, y)` for every prime index
    /// `y * side + x`.
    pub fn rasterize(sieve: &Sieve) -> SieveResult<Bitmap> {
        let side = grid_side(sieve.len());
        let side_px = u32::try_from(side).map_err(|_| {
            SieveError::ResourceExhausted(format!("raster side {side} exceeds u32"))
        })?;

        let mut pixels = vec![BACKGROUND; side * side];
        for y in 0..side {
            for x in 0..side {
                let index = y * side + x;
                if index < sieve.len() && sieve.is_prime(index as u64) {
                    pixels[index] = INK;
                }
            }
        }

        Ok(Bitmap {
            side: side_px,
            pixels,
        })
    }

    /// Encode a bitmap as an 8-bit grayscale PNG with no ancillary chunks.
    pub fn encode_png(bitmap: &Bitmap) -> SieveResult<RenderedImage> {
        let mut bytes = Vec::new();
        let mut encoder = png::Encoder::new(&mut bytes, bitmap.side, bitmap.side);
        encoder.set_color(png::ColorType::Grayscale);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header()?;
        writer.write_image_data(&bitmap.pixels)?;
        writer.finish()?;

        Ok(RenderedImage::new(bytes, bitmap.side))
    }

    /// Rasterize and encode in one step.
    pub fn render_image(sieve: &Sieve) -> SieveResult<RenderedImage> {
        Self::encode_png(&Self::rasterize(sieve)?)
    }
}
