//! The device wallpaper as an injected capability.

use std::fmt;

use anyhow::Result;
use image::RgbaImage;
use log::info;

use crate::def::{API_LEVEL_DESTINATION, FLAG_LOCK, FLAG_SYSTEM};

/// Surface a wallpaper applies to, using `WallpaperManager` flag bits.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Destination(i32);

impl Destination {
    pub const SYSTEM: Destination = Destination(FLAG_SYSTEM);
    pub const LOCK: Destination = Destination(FLAG_LOCK);

    pub fn bits(self) -> i32 {
        self.0
    }
}

impl fmt::Debug for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::SYSTEM => f.write_str("SYSTEM"),
            Self::LOCK => f.write_str("LOCK"),
            Destination(bits) => write!(f, "Destination({bits:#x})"),
        }
    }
}

/// Platform API level (`Build.VERSION.SDK_INT` on Android).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ApiLevel(pub u32);

impl ApiLevel {
    pub fn supports_destination(self) -> bool {
        self.0 >= API_LEVEL_DESTINATION
    }
}

pub trait WallpaperSink {
    fn api_level(&self) -> ApiLevel;

    /// Unqualified set, for levels without destination targeting.
    fn set_bitmap(&mut self, image: &RgbaImage) -> Result<()>;

    fn set_bitmap_for(&mut self, image: &RgbaImage, destination: Destination) -> Result<()>;
}

impl<S: WallpaperSink + ?Sized> WallpaperSink for &mut S {
    fn api_level(&self) -> ApiLevel {
        (**self).api_level()
    }

    fn set_bitmap(&mut self, image: &RgbaImage) -> Result<()> {
        (**self).set_bitmap(image)
    }

    fn set_bitmap_for(&mut self, image: &RgbaImage, destination: Destination) -> Result<()> {
        (**self).set_bitmap_for(image, destination)
    }
}

/// Hand a decoded image to the sink. Targeting, when available, is always the
/// home screen.
pub fn submit<S: WallpaperSink + ?Sized>(sink: &mut S, image: &RgbaImage) -> Result<()> {
    let level = sink.api_level();
    if level.supports_destination() {
        info!("api level {}: setting {:?} wallpaper", level.0, Destination::SYSTEM);
        sink.set_bitmap_for(image, Destination::SYSTEM)
    } else {
        info!("api level {}: setting wallpaper", level.0);
        sink.set_bitmap(image)
    }
}
