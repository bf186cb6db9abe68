use log::{debug, info};

use crate::canvas::{Bitmap, PixelCanvas};
use crate::palette::Palette;
use crate::tile::{self, TILE_PIXEL_HEIGHT, TILE_PIXEL_WIDTH};

pub const TILES_PER_ROW: usize = 20; // Game Boy Printer paper width in tiles
pub const TARGET_WIDTH: usize = 480;
pub const DEFAULT_DPI: u32 = 96;

// Canvas shown before the first print arrives
const INITIAL_WIDTH: usize = 480;
const INITIAL_HEIGHT: usize = 432;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    Comment,
    Record,
}

pub fn classify(line: &str) -> LineKind {
    if line.trim_end_matches('\r').is_empty() {
        LineKind::Blank
    } else if line.starts_with('!')
        || line.starts_with('#')
        || line.starts_with('{')
        || line.starts_with("//")
    {
        LineKind::Comment
    } else {
        LineKind::Record
    }
}

/// Candidate tile records of a capture blob, in order.
pub fn records(blob: &str) -> Vec<&str> {
    blob.split('\n')
        .filter(|line| classify(line) == LineKind::Record)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub tiles_per_row: usize,
    pub tile_rows: usize,
    pub scale_x: usize,
    pub scale_y: usize,
}

impl GridLayout {
    /// Only whole rows of tiles get canvas space.
    pub fn for_records(count: usize) -> Self {
        let scale = TARGET_WIDTH / (TILE_PIXEL_WIDTH * TILES_PER_ROW);
        GridLayout {
            tiles_per_row: TILES_PER_ROW,
            tile_rows: count / TILES_PER_ROW,
            scale_x: scale,
            scale_y: scale,
        }
    }

    pub fn canvas_width(&self) -> usize {
        self.tiles_per_row * TILE_PIXEL_WIDTH * self.scale_x
    }

    pub fn canvas_height(&self) -> usize {
        self.tile_rows * TILE_PIXEL_HEIGHT * self.scale_y
    }

    /// Grid cell (column, row) of the `index`th decoded tile.
    pub fn position(&self, index: usize) -> (usize, usize) {
        (index % self.tiles_per_row, index / self.tiles_per_row)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CaptureSummary {
    pub records: usize,
    pub painted: usize,
    pub skipped: usize,
    pub clipped: usize,
    pub width: usize,
    pub height: usize,
}

/// Owns the print canvas and the palette it is currently painted in.
pub struct PrintView {
    canvas: PixelCanvas,
    palette: Palette,
}

impl PrintView {
    pub fn new(palette: Palette) -> Self {
        let mut canvas = PixelCanvas::new(INITIAL_WIDTH, INITIAL_HEIGHT);
        canvas.fill_all(palette.background());
        PrintView { canvas, palette }
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    #[cfg(test)]
    pub fn canvas(&self) -> &PixelCanvas {
        &self.canvas
    }

    /// Replace the whole canvas with a freshly decoded capture.
    ///
    /// Malformed records are skipped and don't take a grid cell. Tiles past
    /// the last whole row are decoded but clipped.
    pub fn show_capture(&mut self, blob: &str) -> CaptureSummary {
        let records = records(blob);
        let layout = GridLayout::for_records(records.len());
        let (width, height) = (layout.canvas_width(), layout.canvas_height());

        if self.canvas.width() != width || self.canvas.height() != height {
            self.canvas = PixelCanvas::new(width, height);
        }
        self.canvas.fill_all(self.palette.background());

        let colors = self.palette.colors();
        let mut summary = CaptureSummary {
            records: records.len(),
            width,
            height,
            ..CaptureSummary::default()
        };

        let mut tile_count = 0;
        for (line, record) in records.iter().enumerate() {
            let pixels = match tile::decode_record(record) {
                Ok(pixels) => pixels,
                Err(e) => {
                    debug!("skipping record {}: {}", line, e);
                    summary.skipped += 1;
                    continue;
                }
            };

            let (col, row) = layout.position(tile_count);
            tile_count += 1;
            if row >= layout.tile_rows {
                summary.clipped += 1;
                continue;
            }
            let painted = self
                .canvas
                .paint_tile(&pixels, layout.scale_x, layout.scale_y, col, row, colors);
            if let Err(e) = painted {
                panic!("tile {} outside {}x{} canvas: {}", tile_count - 1, width, height, e);
            }
            summary.painted += 1;
        }

        info!(
            "capture: {} records, {} painted, {} skipped, {} clipped ({}x{})",
            summary.records, summary.painted, summary.skipped, summary.clipped, width, height
        );
        summary
    }

    /// Retint the current print without decoding it again.
    pub fn set_palette(&mut self, palette: Palette) {
        if palette == self.palette {
            return;
        }
        let old = self.palette.colors();
        let new = palette.colors();
        for i in 0..4 {
            self.canvas.replace_color(old[i], new[i]);
        }
        debug!("palette {} -> {}", self.palette.name(), palette.name());
        self.palette = palette;
    }

    pub fn toggle_palette(&mut self) -> Palette {
        self.set_palette(self.palette.toggled());
        self.palette
    }

    pub fn bitmap(&self, dpi_x: u32, dpi_y: u32) -> Bitmap {
        self.canvas.materialize(dpi_x, dpi_y)
    }
}

/// Decode a whole capture blob into a bitmap in one go.
pub fn render(blob: &str, palette: Palette) -> Bitmap {
    let mut view = PrintView::new(palette);
    view.show_capture(blob);
    view.bitmap(DEFAULT_DPI, DEFAULT_DPI)
}
