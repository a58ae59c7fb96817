//! I/O helpers for rasters and JSON.
//!
//! - `load_raster`: read a PNG/JPEG/etc. into a 1- or 3-channel `RasterU8`.
//! - `save_raster`: write a raster to disk (grayscale or RGB PNG).
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::RasterU8;
use image::DynamicImage;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk. Grayscale sources stay single-channel, anything
/// else is converted to RGB.
pub fn load_raster(path: &Path) -> Result<RasterU8, String> {
    let img = image::open(path).map_err(|e| format!("Failed to open {}: {e}", path.display()))?;
    let raster = match img {
        DynamicImage::ImageLuma8(gray) => {
            let (w, h) = (gray.width() as usize, gray.height() as usize);
            RasterU8::from_raw(w, h, 1, gray.into_raw())
        }
        other => {
            let rgb = other.into_rgb8();
            let (w, h) = (rgb.width() as usize, rgb.height() as usize);
            RasterU8::from_raw(w, h, 3, rgb.into_raw())
        }
    };
    raster.ok_or_else(|| format!("Inconsistent buffer while decoding {}", path.display()))
}

/// Save a raster to disk. Only 1- and 3-channel rasters are supported.
pub fn save_raster(raster: &RasterU8, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let (w, h) = (raster.width() as u32, raster.height() as u32);
    let result = match raster.channels() {
        1 => image::GrayImage::from_raw(w, h, raster.data().to_vec())
            .ok_or_else(|| "Failed to create image buffer".to_string())?
            .save(path),
        3 => image::RgbImage::from_raw(w, h, raster.data().to_vec())
            .ok_or_else(|| "Failed to create image buffer".to_string())?
            .save(path),
        other => return Err(format!("Cannot save raster with {other} channels")),
    };
    result.map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
