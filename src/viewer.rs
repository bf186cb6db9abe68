use log::{error, info, warn};
use minifb::{Key, KeyRepeat, Window, WindowOptions};

use crate::canvas::Bitmap;
use crate::capture::PrintView;
use crate::config::Session;
use crate::error::Error;
use crate::export;
use crate::palette::Rgb;
use crate::source::{PrinterEvent, PrinterSource};

const TITLE: &str = "Game Boy Printer";
// minifb can't open a zero-height window, an empty print gets this strip
const MIN_HEIGHT: usize = 24;

/// Window showing the latest print.
///
/// Keys: N pulls the next capture, P swaps palette, S saves a PNG, Esc quits.
pub struct Viewer {
    window: Window,
    buf: Vec<u32>,
    width: usize,
    height: usize,
}

impl Viewer {
    pub fn new(bitmap: &Bitmap, fill: Rgb) -> Result<Self, Error> {
        let width = bitmap.width;
        let height = bitmap.height.max(MIN_HEIGHT);
        let mut window = Window::new(TITLE, width, height, WindowOptions::default())?;
        window.set_target_fps(60);
        let mut viewer = Viewer {
            window,
            buf: Vec::new(),
            width,
            height,
        };
        viewer.buf = frame(bitmap, height, fill);
        Ok(viewer)
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open() && !self.window.is_key_down(Key::Escape)
    }

    /// Show a new bitmap, reopening the window when the print size changed.
    pub fn show(&mut self, bitmap: &Bitmap, fill: Rgb) -> Result<(), Error> {
        if bitmap.width != self.width || bitmap.height.max(MIN_HEIGHT) != self.height {
            *self = Viewer::new(bitmap, fill)?;
        } else {
            self.buf = frame(bitmap, self.height, fill);
        }
        Ok(())
    }

    fn present(&mut self) -> Result<(), Error> {
        self.window.update_with_buffer(&self.buf, self.width, self.height)?;
        Ok(())
    }
}

/// Drive the window until it is closed or the printer disconnects.
pub fn run<S: PrinterSource>(
    view: &mut PrintView,
    source: &mut S,
    session: &mut Session,
) -> Result<(), Error> {
    let dpi = session.dpi();
    let mut viewer = Viewer::new(&view.bitmap(dpi, dpi), view.palette().background())?;

    // Show the first capture straight away
    let mut pull = true;

    while viewer.is_open() {
        if pull || viewer.window.is_key_pressed(Key::N, KeyRepeat::No) {
            pull = false;
            match source.next_event()? {
                PrinterEvent::Capture(blob) => {
                    view.show_capture(&blob);
                    viewer.show(&view.bitmap(dpi, dpi), view.palette().background())?;
                }
                PrinterEvent::Disconnected => {
                    info!("printer disconnected, closing viewer");
                    break;
                }
            }
        }

        if viewer.window.is_key_pressed(Key::P, KeyRepeat::No) {
            let palette = view.toggle_palette();
            viewer.show(&view.bitmap(dpi, dpi), palette.background())?;
            if let Err(e) = session.remember_palette(palette) {
                warn!("could not persist palette choice: {}", e);
            }
        }

        if viewer.window.is_key_pressed(Key::S, KeyRepeat::No) {
            let bitmap = view.bitmap(dpi, dpi);
            if bitmap.height == 0 {
                warn!("nothing to save, the print has no complete tile rows");
            } else if let Err(e) = export::save_png(&bitmap, &session.export_path) {
                error!("saving {} failed: {}", session.export_path.display(), e);
            }
        }

        viewer.present()?;
    }
    Ok(())
}

/// Window contents for `bitmap`, padded below with `fill` up to `height` rows.
fn frame(bitmap: &Bitmap, height: usize, fill: Rgb) -> Vec<u32> {
    let mut buf = bitmap.to_u32_buffer();
    buf.resize(bitmap.width * height, fill.to_u32());
    buf
}
