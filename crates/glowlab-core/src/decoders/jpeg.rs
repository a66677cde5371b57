//! JPEG image decoder

use std::path::Path;

use crate::image::RgbImage;

/// Decode a JPEG file to 3-channel f32 RGB.
pub(crate) fn decode_jpeg<P: AsRef<Path>>(path: P) -> Result<RgbImage, String> {
    let dynamic =
        image::open(path.as_ref()).map_err(|e| format!("Failed to decode JPEG file: {}", e))?;
    let rgb = dynamic.to_rgb8();
    let (width, height) = (rgb.width(), rgb.height());

    let data: Vec<f32> = rgb.as_raw().iter().map(|&v| v as f32 / 255.0).collect();
    RgbImage::from_data(width, height, data)
}
