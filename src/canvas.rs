use crate::error::CanvasError;
use crate::palette::Rgb;
use crate::tile::{DecodedTile, TILE_PIXEL_HEIGHT, TILE_PIXEL_WIDTH};

/// Growable RGB pixel buffer that printer tiles are composited into.
///
/// Pixels are stored row-major, 3 bytes each. The canvas never changes size;
/// a print with a different tile count gets a new canvas.
pub struct PixelCanvas {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

/// Immutable snapshot of a canvas, ready to be shown or exported.
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    pub width: usize,
    pub height: usize,
    pub dpi_x: u32,
    pub dpi_y: u32,
    pub pixels: Vec<u8>,
}

impl PixelCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        PixelCanvas {
            width,
            height,
            pixels: vec![0; width * height * 3],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[cfg(test)]
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 3;
        Some(Rgb::new(self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]))
    }

    pub fn fill_all(&mut self, color: Rgb) {
        for px in self.pixels.chunks_exact_mut(3) {
            px.copy_from_slice(&[color.r, color.g, color.b]);
        }
    }

    pub fn set_rect(
        &mut self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        color: Rgb,
    ) -> Result<(), CanvasError> {
        self.check_bounds(x, y, width, height)?;
        for row in y..y + height {
            let start = (row * self.width + x) * 3;
            let end = start + width * 3;
            for px in self.pixels[start..end].chunks_exact_mut(3) {
                px.copy_from_slice(&[color.r, color.g, color.b]);
            }
        }
        Ok(())
    }

    /// Paint a decoded tile at grid cell (`tile_col`, `tile_row`), each logical
    /// pixel blown up to a `scale_x` x `scale_y` block.
    ///
    /// The whole destination is checked up front, so a tile that doesn't fit
    /// leaves the canvas untouched.
    pub fn paint_tile(
        &mut self,
        tile: &DecodedTile,
        scale_x: usize,
        scale_y: usize,
        tile_col: usize,
        tile_row: usize,
        palette: &[Rgb; 4],
    ) -> Result<(), CanvasError> {
        // saturated values can never fit, so check_bounds rejects them
        let tile_w = TILE_PIXEL_WIDTH.saturating_mul(scale_x);
        let tile_h = TILE_PIXEL_HEIGHT.saturating_mul(scale_y);
        let x_offset = tile_col.saturating_mul(tile_w);
        let y_offset = tile_row.saturating_mul(tile_h);
        self.check_bounds(x_offset, y_offset, tile_w, tile_h)?;

        for row in 0..TILE_PIXEL_HEIGHT {
            for col in 0..TILE_PIXEL_WIDTH {
                let shade = tile[row * TILE_PIXEL_WIDTH + col];
                self.set_rect(
                    x_offset + col * scale_x,
                    y_offset + row * scale_y,
                    scale_x,
                    scale_y,
                    palette[(shade & 0x03) as usize],
                )?;
            }
        }
        Ok(())
    }

    /// Rewrite every pixel that is exactly `old` to `new`.
    pub fn replace_color(&mut self, old: Rgb, new: Rgb) {
        let old = [old.r, old.g, old.b];
        for px in self.pixels.chunks_exact_mut(3) {
            if *px == old {
                px.copy_from_slice(&[new.r, new.g, new.b]);
            }
        }
    }

    pub fn materialize(&self, dpi_x: u32, dpi_y: u32) -> Bitmap {
        Bitmap {
            width: self.width,
            height: self.height,
            dpi_x,
            dpi_y,
            pixels: self.pixels.clone(),
        }
    }

    fn check_bounds(
        &self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> Result<(), CanvasError> {
        let fits_x = x.checked_add(width).map_or(false, |r| r <= self.width);
        let fits_y = y.checked_add(height).map_or(false, |b| b <= self.height);
        if fits_x && fits_y {
            Ok(())
        } else {
            Err(CanvasError::OutOfBounds { x, y, width, height })
        }
    }
}

impl Bitmap {
    #[cfg(test)]
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 3;
        Some(Rgb::new(self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]))
    }

    /// Convert to a 0x00RRGGBB framebuffer for minifb.
    pub fn to_u32_buffer(&self) -> Vec<u32> {
        self.pixels
            .chunks_exact(3)
            .map(|px| Rgb::new(px[0], px[1], px[2]).to_u32())
            .collect()
    }
}

#[cfg(test)]
mod tests;
