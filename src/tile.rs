use crate::error::TileError;

pub const TILE_PIXEL_WIDTH: usize = 8;
pub const TILE_PIXEL_HEIGHT: usize = 8;
pub const TILE_BYTES: usize = 16;
pub const TILE_PIXELS: usize = TILE_PIXEL_WIDTH * TILE_PIXEL_HEIGHT;

/// 64 shade indices (0-3), row-major.
pub type DecodedTile = [u8; TILE_PIXELS];

/// Decode one hex tile record as sent by the printer emulator.
///
/// Spaces and carriage returns are ignored. Anything else that doesn't leave
/// exactly 32 hex digits is rejected.
pub fn decode_record(record: &str) -> Result<DecodedTile, TileError> {
    let digits: Vec<u8> = record
        .bytes()
        .filter(|&b| b != b' ' && b != b'\r')
        .collect();
    if digits.len() != TILE_BYTES * 2 {
        return Err(TileError::Length(digits.len()));
    }

    let mut bytes = [0u8; TILE_BYTES];
    for (offset, pair) in digits.chunks_exact(2).enumerate() {
        let hi = hex_value(pair[0]).ok_or(TileError::Hex { offset })?;
        let lo = hex_value(pair[1]).ok_or(TileError::Hex { offset })?;
        bytes[offset] = (hi << 4) | lo;
    }

    Ok(decode_tile(&bytes))
}

/// Decode 16 bytes of 2bpp tile data into 64 pixel shade indices (0-3).
///
/// Each row is two bytes: low bit plane first, then high bit plane. Bit 7 is
/// the leftmost pixel.
pub fn decode_tile(bytes: &[u8; TILE_BYTES]) -> DecodedTile {
    let mut pixels = [0u8; TILE_PIXELS];
    for row in 0..TILE_PIXEL_HEIGHT {
        let byte1 = bytes[row * 2];
        let byte2 = bytes[row * 2 + 1];
        for col in 0..TILE_PIXEL_WIDTH {
            let bit = 7 - col;
            let lo = (byte1 >> bit) & 1;
            let hi = (byte2 >> bit) & 1;
            pixels[row * TILE_PIXEL_WIDTH + col] = (hi << 1) | lo;
        }
    }
    pixels
}

fn hex_value(digit: u8) -> Option<u8> {
    (digit as char).to_digit(16).map(|v| v as u8)
}
