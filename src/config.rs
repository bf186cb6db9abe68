use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::capture::DEFAULT_DPI;
use crate::error::Error;
use crate::palette::Palette;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    pub display: Display,
    pub export: Export,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Display {
    /// Paint prints in the DMG green shades instead of grayscale.
    pub dmg_palette: bool,
    pub dpi: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Export {
    pub path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            display: Display {
                dmg_palette: false,
                dpi: DEFAULT_DPI,
            },
            export: Export {
                path: PathBuf::from("gameboy_print.png"),
            },
        }
    }
}

impl Config {
    pub fn config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("gbp_viewer");
        path.push("config.toml");
        path
    }

    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Read the config at `path`, writing defaults there on first run.
    /// Unreadable or malformed files fall back to defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            let config = Config::default();
            match config.save_to(path) {
                Ok(()) => info!("wrote default config to {}", path.display()),
                Err(e) => warn!("could not write {}: {}", path.display(), e),
            }
            return config;
        }
        match Self::read(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("error loading {}: {}; using defaults", path.display(), e);
                Config::default()
            }
        }
    }

    fn read(path: &Path) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn palette(&self) -> Palette {
        Palette::from_dmg_flag(self.display.dmg_palette)
    }

    pub fn set_palette(&mut self, palette: Palette) {
        self.display.dmg_palette = palette.is_dmg();
    }
}

/// The saved config for one run, plus command-line overrides that are
/// never written back.
pub struct Session {
    pub config: Config,
    config_path: PathBuf,
    pub export_path: PathBuf,
}

impl Session {
    pub fn new(config: Config, config_path: PathBuf, out: Option<PathBuf>) -> Self {
        let export_path = out.unwrap_or_else(|| config.export.path.clone());
        Session { config, config_path, export_path }
    }

    pub fn dpi(&self) -> u32 {
        self.config.display.dpi
    }

    /// Persist a palette toggle. Only the palette flag changes on disk.
    pub fn remember_palette(&mut self, palette: Palette) -> Result<(), Error> {
        self.config.set_palette(palette);
        self.config.save_to(&self.config_path)
    }
}
