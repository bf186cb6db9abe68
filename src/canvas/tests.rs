use super::*;
use crate::palette::{PALETTE_DMG_GREEN, PALETTE_GRAYSCALE};

const RED: Rgb = Rgb::new(0xFF, 0, 0);
const BLUE: Rgb = Rgb::new(0, 0, 0xFF);

fn count(canvas: &PixelCanvas, color: Rgb) -> usize {
    let mut n = 0;
    for y in 0..canvas.height() {
        for x in 0..canvas.width() {
            if canvas.pixel(x, y) == Some(color) {
                n += 1;
            }
        }
    }
    n
}

// ===============================================
// Allocation and fill
// ===============================================
#[test]
fn test_new_canvas_is_black() {
    let canvas = PixelCanvas::new(4, 3);
    assert_eq!(canvas.width(), 4);
    assert_eq!(canvas.height(), 3);
    assert_eq!(count(&canvas, Rgb::new(0, 0, 0)), 12);
}

#[test]
fn test_fill_all() {
    let mut canvas = PixelCanvas::new(5, 5);
    canvas.fill_all(RED);
    assert_eq!(count(&canvas, RED), 25);
}

#[test]
fn test_zero_height_canvas() {
    let mut canvas = PixelCanvas::new(480, 0);
    canvas.fill_all(RED);
    assert_eq!(canvas.pixel(0, 0), None);
    assert!(canvas.materialize(96, 96).pixels.is_empty());
}

#[test]
fn test_pixel_out_of_range() {
    let canvas = PixelCanvas::new(2, 2);
    assert_eq!(canvas.pixel(2, 0), None);
    assert_eq!(canvas.pixel(0, 2), None);
}

// ===============================================
// Rect and tile painting
// ===============================================
#[test]
fn test_set_rect_confined() {
    let mut canvas = PixelCanvas::new(6, 6);
    canvas.set_rect(2, 1, 3, 2, RED).unwrap();
    assert_eq!(count(&canvas, RED), 6);
    assert_eq!(canvas.pixel(2, 1), Some(RED));
    assert_eq!(canvas.pixel(4, 2), Some(RED));
    assert_ne!(canvas.pixel(5, 2), Some(RED));
    assert_ne!(canvas.pixel(2, 3), Some(RED));
}

#[test]
fn test_set_rect_out_of_bounds() {
    let mut canvas = PixelCanvas::new(4, 4);
    let err = canvas.set_rect(3, 0, 2, 1, RED).unwrap_err();
    assert_eq!(err, CanvasError::OutOfBounds { x: 3, y: 0, width: 2, height: 1 });
    assert_eq!(count(&canvas, RED), 0);
}

#[test]
fn test_paint_tile_scaled_offset() {
    let mut canvas = PixelCanvas::new(48, 24);
    canvas.fill_all(BLUE);
    let tile = [3u8; 64];
    canvas.paint_tile(&tile, 3, 3, 1, 0, &PALETTE_GRAYSCALE).unwrap();

    // Tile (1, 0) covers x 24..48, y 0..24
    assert_eq!(canvas.pixel(24, 0), Some(PALETTE_GRAYSCALE[3]));
    assert_eq!(canvas.pixel(47, 23), Some(PALETTE_GRAYSCALE[3]));
    assert_eq!(canvas.pixel(23, 0), Some(BLUE));
    assert_eq!(count(&canvas, PALETTE_GRAYSCALE[3]), 24 * 24);
}

#[test]
fn test_paint_tile_maps_shades() {
    let mut canvas = PixelCanvas::new(16, 16);
    let mut tile = [0u8; 64];
    tile[0] = 1;
    tile[7] = 2;
    tile[63] = 3;
    canvas.paint_tile(&tile, 2, 2, 0, 0, &PALETTE_DMG_GREEN).unwrap();

    assert_eq!(canvas.pixel(0, 0), Some(PALETTE_DMG_GREEN[1]));
    assert_eq!(canvas.pixel(1, 1), Some(PALETTE_DMG_GREEN[1]));
    assert_eq!(canvas.pixel(14, 0), Some(PALETTE_DMG_GREEN[2]));
    assert_eq!(canvas.pixel(15, 15), Some(PALETTE_DMG_GREEN[3]));
    assert_eq!(canvas.pixel(2, 0), Some(PALETTE_DMG_GREEN[0]));
}

#[test]
fn test_paint_tile_out_of_bounds_writes_nothing() {
    let mut canvas = PixelCanvas::new(24, 24);
    canvas.fill_all(BLUE);
    let tile = [3u8; 64];
    assert!(canvas.paint_tile(&tile, 3, 3, 0, 1, &PALETTE_GRAYSCALE).is_err());
    assert!(canvas.paint_tile(&tile, 3, 3, 1, 0, &PALETTE_GRAYSCALE).is_err());
    assert_eq!(count(&canvas, BLUE), 24 * 24);
}

#[test]
fn test_paint_tile_huge_offsets_rejected() {
    let mut canvas = PixelCanvas::new(24, 24);
    let tile = [3u8; 64];
    assert!(canvas.paint_tile(&tile, 3, 3, usize::MAX, 0, &PALETTE_GRAYSCALE).is_err());
    assert!(canvas.paint_tile(&tile, 3, 3, 0, usize::MAX / 2, &PALETTE_GRAYSCALE).is_err());
    assert!(canvas.paint_tile(&tile, usize::MAX, 1, 0, 0, &PALETTE_GRAYSCALE).is_err());
    assert_eq!(count(&canvas, PALETTE_GRAYSCALE[3]), 0);
}

// ===============================================
// Colour replacement and snapshots
// ===============================================
#[test]
fn test_replace_color_exact_match_only() {
    let mut canvas = PixelCanvas::new(4, 1);
    canvas.fill_all(RED);
    canvas.set_rect(0, 0, 1, 1, Rgb::new(0xFE, 0, 0)).unwrap();
    canvas.replace_color(RED, BLUE);
    assert_eq!(canvas.pixel(0, 0), Some(Rgb::new(0xFE, 0, 0)));
    assert_eq!(count(&canvas, BLUE), 3);
}

#[test]
fn test_replace_color_roundtrip() {
    let mut canvas = PixelCanvas::new(16, 8);
    let tile: [u8; 64] = core::array::from_fn(|i| (i % 4) as u8);
    canvas.paint_tile(&tile, 2, 1, 0, 0, &PALETTE_GRAYSCALE).unwrap();
    let before = canvas.materialize(96, 96);

    for i in 0..4 {
        canvas.replace_color(PALETTE_GRAYSCALE[i], PALETTE_DMG_GREEN[i]);
    }
    assert_ne!(canvas.materialize(96, 96), before);
    for i in 0..4 {
        canvas.replace_color(PALETTE_DMG_GREEN[i], PALETTE_GRAYSCALE[i]);
    }
    assert_eq!(canvas.materialize(96, 96), before);
}

#[test]
fn test_materialize_is_snapshot() {
    let mut canvas = PixelCanvas::new(2, 2);
    canvas.fill_all(RED);
    let bitmap = canvas.materialize(96, 72);
    canvas.fill_all(BLUE);

    assert_eq!(bitmap.dpi_x, 96);
    assert_eq!(bitmap.dpi_y, 72);
    assert_eq!(bitmap.pixel(1, 1), Some(RED));
    assert_eq!(canvas.materialize(96, 72).pixel(1, 1), Some(BLUE));
}

#[test]
fn test_bitmap_u32_buffer() {
    let mut canvas = PixelCanvas::new(2, 1);
    canvas.fill_all(RED);
    canvas.set_rect(1, 0, 1, 1, BLUE).unwrap();
    assert_eq!(canvas.materialize(96, 96).to_u32_buffer(), vec![0x00FF0000, 0x000000FF]);
}
