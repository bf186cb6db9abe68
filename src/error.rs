//! Error types for decoding, compositing and exporting printer captures.

use thiserror::Error;

/// Why a single tile record could not be decoded.
///
/// These are never fatal: the capture pipeline skips the record and keeps
/// painting the rest of the print.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TileError {
    #[error("tile record has {0} hex characters, expected 32")]
    Length(usize),

    #[error("invalid hex pair at byte {offset}")]
    Hex { offset: usize },
}

/// A write that would fall outside the pixel canvas.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CanvasError {
    #[error("rect at ({x}, {y}) sized {width}x{height} does not fit the canvas")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    PngEncode(#[from] png::EncodingError),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("config serialize error: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    #[error("window error: {0}")]
    Window(String),
}

impl From<minifb::Error> for Error {
    fn from(e: minifb::Error) -> Self {
        Error::Window(e.to_string())
    }
}
