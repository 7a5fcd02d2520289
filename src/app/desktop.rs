use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Result};
use image::RgbaImage;
use log::{info, LevelFilter};

use crate::config::Config;
use crate::def::{API_LEVEL_DESTINATION, APP_NAME_E, WALLPAPER_FILE_NAME};
use crate::sink::{ApiLevel, Destination, WallpaperSink};

pub fn init_logger(level: LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}

pub fn get_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_NAME_E)
}

pub fn get_cache_dir(cfg: &Config) -> PathBuf {
    match &cfg.cache_dir {
        Some(dir) => PathBuf::from(dir),
        None => dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(APP_NAME_E),
    }
}

/// Stages the decoded image as a PNG and applies it through the desktop
/// environment's wallpaper setting.
pub struct DesktopWallpaperSink {
    cache_dir: PathBuf,
}

impl DesktopWallpaperSink {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self { cache_dir: cache_dir.into() }
    }

    pub fn wallpaper_file_path(&self) -> PathBuf {
        self.cache_dir.join(WALLPAPER_FILE_NAME)
    }

    fn stage(&self, image: &RgbaImage) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.cache_dir)?;
        let path = self.wallpaper_file_path();
        image.save_with_format(&path, image::ImageFormat::Png)?;
        info!("staged wallpaper {:?}", path);
        Ok(path)
    }
}

fn apply(path: &Path) -> Result<()> {
    let path = path
        .to_str()
        .ok_or_else(|| anyhow!("wallpaper path is not valid UTF-8: {path:?}"))?;
    wallpaper::set_from_path(path).map_err(|e| anyhow!("{e}"))
}

impl WallpaperSink for DesktopWallpaperSink {
    /// Desktops always accept a home-screen destination.
    fn api_level(&self) -> ApiLevel {
        ApiLevel(API_LEVEL_DESTINATION)
    }

    fn set_bitmap(&mut self, image: &RgbaImage) -> Result<()> {
        let path = self.stage(image)?;
        apply(&path)
    }

    fn set_bitmap_for(&mut self, image: &RgbaImage, destination: Destination) -> Result<()> {
        if destination != Destination::SYSTEM {
            bail!("{destination:?} wallpaper is not supported on this platform");
        }
        self.set_bitmap(image)
    }
}
