//! Image decoders for photo import.
//!
//! PNG and JPEG sources are decoded to interleaved f32 RGB in 0.0-1.0.

mod jpeg;
mod png;


use std::path::Path;

use crate::image::{RgbImage, RgbaImage};

pub(crate) use png::decode_png_rgba;

/// Decode an image from a file path, dispatching on the extension.
pub fn decode_image<P: AsRef<Path>>(path: P) -> Result<RgbImage, String> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .ok_or_else(|| "No file extension found".to_string())?;

    match extension.as_str() {
        "png" => png::decode_png(path),
        "jpg" | "jpeg" => jpeg::decode_jpeg(path),
        _ => Err(format!("Unsupported file format: {}", extension)),
    }
}

/// Decode an overlay texture, keeping its alpha channel.
pub fn decode_overlay<P: AsRef<Path>>(path: P) -> Result<RgbaImage, String> {
    decode_png_rgba(path)
}
