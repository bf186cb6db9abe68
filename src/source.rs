use std::fs;
use std::io::BufRead;
use std::path::PathBuf;

use log::{debug, info};

use crate::error::Error;

/// Line that separates two captures in a streamed dump.
pub const CAPTURE_SEPARATOR: &str = "---";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrinterEvent {
    /// A complete raw printer dump, one record per line.
    Capture(String),
    /// No further captures will arrive.
    Disconnected,
}

/// Something that hands over printer dumps one capture at a time.
pub trait PrinterSource {
    fn next_event(&mut self) -> Result<PrinterEvent, Error>;
}

/// Each dump file is one capture.
pub struct DumpFiles {
    paths: std::vec::IntoIter<PathBuf>,
}

impl DumpFiles {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        DumpFiles { paths: paths.into_iter() }
    }
}

impl PrinterSource for DumpFiles {
    fn next_event(&mut self) -> Result<PrinterEvent, Error> {
        match self.paths.next() {
            Some(path) => {
                let blob = fs::read_to_string(&path)?;
                info!("loaded {} ({} bytes)", path.display(), blob.len());
                Ok(PrinterEvent::Capture(blob))
            }
            None => Ok(PrinterEvent::Disconnected),
        }
    }
}

/// Captures streamed over a reader, separated by `---` lines.
pub struct ReaderSource<R: BufRead> {
    reader: R,
    finished: bool,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        ReaderSource { reader, finished: false }
    }
}

impl<R: BufRead> PrinterSource for ReaderSource<R> {
    fn next_event(&mut self) -> Result<PrinterEvent, Error> {
        let mut blob = String::new();
        let mut line = String::new();
        while !self.finished {
            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                debug!("printer stream closed");
                self.finished = true;
                break;
            }
            if line.trim_end_matches(['\n', '\r']) == CAPTURE_SEPARATOR {
                if blob.is_empty() {
                    continue;
                }
                return Ok(PrinterEvent::Capture(blob));
            }
            blob.push_str(&line);
        }

        if blob.is_empty() {
            Ok(PrinterEvent::Disconnected)
        } else {
            Ok(PrinterEvent::Capture(blob))
        }
    }
}
