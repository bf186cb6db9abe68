use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::info;
use png::{BitDepth, ColorType, PixelDimensions, Unit};

use crate::canvas::Bitmap;
use crate::error::Error;

const METERS_PER_INCH: f64 = 0.0254;

fn pixels_per_meter(dpi: u32) -> u32 {
    (dpi as f64 / METERS_PER_INCH).round() as u32
}

/// Encode a bitmap as 8-bit RGB PNG, with its DPI stored in the pHYs chunk.
pub fn write_png<W: Write>(bitmap: &Bitmap, out: W) -> Result<(), Error> {
    let mut encoder = png::Encoder::new(out, bitmap.width as u32, bitmap.height as u32);
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Eight);
    encoder.set_pixel_dims(Some(PixelDimensions {
        xppu: pixels_per_meter(bitmap.dpi_x),
        yppu: pixels_per_meter(bitmap.dpi_y),
        unit: Unit::Meter,
    }));
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&bitmap.pixels)?;
    writer.finish()?;
    Ok(())
}

pub fn save_png(bitmap: &Bitmap, path: &Path) -> Result<(), Error> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    write_png(bitmap, BufWriter::new(file))?;
    info!("saved {}x{} print to {}", bitmap.width, bitmap.height, path.display());
    Ok(())
}
