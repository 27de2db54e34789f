//! I/O helpers for grayscale images and JSON.
//!
//! - `load_grayscale_image`: read a PNG/JPEG/etc. into an owned 8-bit gray
//!   buffer.
//! - `save_rgb_image`: write an interleaved RGB buffer to a PNG.
//! - `save_persistence_map`: write an `ImageF32` persistence map as a
//!   16-bit grayscale PNG in 8.8 fixed point (PNG has no float format).
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{ImageF32, ImageU8};
use image::{GrayImage, ImageBuffer, Luma, Rgb, RgbImage};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Owned 8-bit grayscale buffer with borrowed view conversion.
#[derive(Clone, Debug)]
pub struct GrayImageU8 {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl GrayImageU8 {
    /// Construct an owned grayscale buffer given raw bytes.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            data,
        }
    }

    /// Image width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Mutable access to the raw bytes (used for border seeding).
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Borrow as a read-only `ImageU8` view
    pub fn as_view(&self) -> ImageU8<'_> {
        ImageU8 {
            w: self.width,
            h: self.height,
            stride: self.width,
            data: &self.data,
        }
    }
}

/// Load an image from disk and convert to 8-bit grayscale.
pub fn load_grayscale_image(path: &Path) -> Result<GrayImageU8, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_luma8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    let data = img.into_raw();
    Ok(GrayImageU8::new(width, height, data))
}

/// Save an interleaved RGB buffer (3 bytes per pixel) to a PNG.
pub fn save_rgb_image(path: &Path, data: Vec<u8>, w: usize, h: usize) -> Result<(), String> {
    let img: RgbImage = ImageBuffer::<Rgb<u8>, Vec<u8>>::from_raw(w as u32, h as u32, data)
        .ok_or_else(|| "RGB buffer size does not match dimensions".to_string())?;
    img.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Save an 8-bit grayscale buffer to a PNG.
pub fn save_grayscale_image(path: &Path, buffer: &GrayImageU8) -> Result<(), String> {
    let data = buffer.data.clone();
    let img: GrayImage =
        ImageBuffer::<Luma<u8>, Vec<u8>>::from_raw(buffer.width as u32, buffer.height as u32, data)
            .ok_or_else(|| "Failed to create image buffer".to_string())?;
    img.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Save a persistence map to a 16-bit grayscale PNG.
///
/// Values are encoded in 8.8 fixed point (`v * 256`, clamped to the u16
/// range), which covers the full contrast range of 8-bit inputs while
/// keeping the fractional part of quantized saddle levels.
pub fn save_persistence_map(path: &Path, map: &ImageF32) -> Result<(), String> {
    let mut out = ImageBuffer::<Luma<u16>, Vec<u16>>::new(map.w as u32, map.h as u32);
    for y in 0..map.h {
        for x in 0..map.w {
            let v = (map.get(x, y) * 256.0).clamp(0.0, u16::MAX as f32);
            out.put_pixel(x as u32, y as u32, Luma([v as u16]));
        }
    }
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}
