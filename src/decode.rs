use std::path::Path;

use image::{ImageReader, Rgba, RgbaImage};
use log::info;

use crate::error::WallpaperError;

/// Decode the file at `path` into an RGBA bitmap. The format is sniffed from
/// the content, so a misnamed file still decodes.
pub fn decode_file(path: &Path) -> Result<RgbaImage, WallpaperError> {
    info!("decoding {path:?}");
    let reader = ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|e| WallpaperError::Decode(format!("{path:?}: {e}")))?;
    let image = reader
        .decode()
        .map_err(|e| WallpaperError::Decode(format!("{path:?}: {e}")))?
        .to_rgba8();
    info!("decoded {}x{}", image.width(), image.height());
    Ok(image)
}

/// Pack a pixel as Android `ARGB_8888`.
fn rgba_to_i32(rgba: &Rgba<u8>) -> i32 {
    let [r, g, b, a] = rgba.0;
    ((a as i32) << 24) | ((r as i32) << 16) | ((g as i32) << 8) | (b as i32)
}

/// Pixels in row-major order, ready for `Bitmap.createBitmap(int[], w, h, ARGB_8888)`.
pub fn to_argb_pixels(image: &RgbaImage) -> Vec<i32> {
    image.pixels().map(rgba_to_i32).collect()
}
