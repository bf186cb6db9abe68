mod canvas;
mod capture;
mod config;
mod error;
mod export;
mod palette;
mod source;
mod tile;
mod viewer;

use std::io;
use std::path::PathBuf;

use log::{error, info, warn};

use canvas::Bitmap;
use capture::PrintView;
use config::{Config, Session};
use error::Error;
use palette::Palette;
use source::{DumpFiles, PrinterEvent, PrinterSource, ReaderSource};

struct Args {
    headless: bool,
    dmg: bool,
    out: Option<PathBuf>,
    dumps: Vec<PathBuf>,
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut parsed = Args {
        headless: false,
        dmg: false,
        out: None,
        dumps: Vec::new(),
    };
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--headless" => parsed.headless = true,
            "--dmg" => parsed.dmg = true,
            "--out" => {
                let path = iter.next().ok_or("--out needs a file name")?;
                parsed.out = Some(PathBuf::from(path));
            }
            flag if flag.starts_with("--") => return Err(format!("unknown option {}", flag)),
            dump => parsed.dumps.push(PathBuf::from(dump)),
        }
    }
    Ok(parsed)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let parsed = parse_args(&args).unwrap_or_else(|e| {
        eprintln!("{}", e);
        eprintln!("Usage: {} [--headless] [--dmg] [--out <print.png>] [dump.txt...]", args[0]);
        std::process::exit(1);
    });

    let config = Config::load();
    // --dmg only picks the starting palette; it is not saved
    let palette = if parsed.dmg { Palette::DmgGreen } else { config.palette() };
    let mut session = Session::new(config, Config::config_path(), parsed.out.clone());

    let result = if parsed.dumps.is_empty() {
        info!("reading captures from stdin");
        let mut source = ReaderSource::new(io::stdin().lock());
        run(&parsed, palette, &mut source, &mut session)
    } else {
        let mut source = DumpFiles::new(parsed.dumps.clone());
        run(&parsed, palette, &mut source, &mut session)
    };

    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run<S: PrinterSource>(
    args: &Args,
    palette: Palette,
    source: &mut S,
    session: &mut Session,
) -> Result<(), Error> {
    if args.headless {
        run_headless(palette, source, session).map(|_| ())
    } else {
        let mut view = PrintView::new(palette);
        viewer::run(&mut view, source, session)
    }
}

/// Render every capture and save the last one.
fn run_headless<S: PrinterSource>(
    palette: Palette,
    source: &mut S,
    session: &Session,
) -> Result<Option<Bitmap>, Error> {
    let mut last = None;
    while let PrinterEvent::Capture(blob) = source.next_event()? {
        last = Some(capture::render(&blob, palette));
    }

    let Some(mut bitmap) = last else {
        warn!("no captures received");
        return Ok(None);
    };
    if bitmap.height == 0 {
        warn!("last print has no complete tile rows, nothing to save");
        return Ok(None);
    }
    bitmap.dpi_x = session.dpi();
    bitmap.dpi_y = session.dpi();
    export::save_png(&bitmap, &session.export_path)?;
    Ok(Some(bitmap))
}
