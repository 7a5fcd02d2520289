pub const APP_NAME_E: &str = "lunya_wallpaper";

pub const DEFAULT_CHANNEL: &str = "com.furry.wallpaper/set";

pub const METHOD_SET_WALLPAPER: &str = "setWallpaper";
pub const ARG_PATH: &str = "path";

pub const SUCCESS_MESSAGE: &str = "Wallpaper set!";

pub const CODE_PATH_ERROR: &str = "PATH_ERROR";
pub const CODE_BITMAP_ERROR: &str = "BITMAP_ERROR";
pub const CODE_WALLPAPER_ERROR: &str = "WALLPAPER_ERROR";

pub const MSG_PATH_ERROR: &str = "Image path was not provided";
pub const MSG_BITMAP_ERROR: &str = "Failed to load the image";

/// Android 7.0 (N), first level where `WallpaperManager.setBitmap` takes a destination.
pub const API_LEVEL_DESTINATION: u32 = 24;

/// `WallpaperManager.FLAG_SYSTEM`
pub const FLAG_SYSTEM: i32 = 1;
/// `WallpaperManager.FLAG_LOCK`
pub const FLAG_LOCK: i32 = 2;

/// Name of the cached file handed to desktop wallpaper backends.
pub const WALLPAPER_FILE_NAME: &str = "wallpaper.png";
