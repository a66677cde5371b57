//! PNG image decoder

use std::path::Path;

use crate::image::{RgbImage, RgbaImage};

/// Decode a PNG file to 3-channel f32 RGB.
pub(crate) fn decode_png<P: AsRef<Path>>(path: P) -> Result<RgbImage, String> {
    let (width, height, data) = decode_png_channels(path, 3)?;
    RgbImage::from_data(width, height, data)
}

/// Decode a PNG file to 4-channel f32 RGBA, keeping the alpha channel.
/// Used for overlay textures; sources without alpha get alpha = 1.
pub(crate) fn decode_png_rgba<P: AsRef<Path>>(path: P) -> Result<RgbaImage, String> {
    let (width, height, data) = decode_png_channels(path, 4)?;
    RgbaImage::from_data(width, height, data)
}

/// Shared PNG decode path producing `out_channels` interleaved f32 values
/// per pixel (3 drops alpha, 4 synthesizes opaque alpha when missing).
fn decode_png_channels<P: AsRef<Path>>(
    path: P,
    out_channels: usize,
) -> Result<(u32, u32, Vec<f32>), String> {
    use std::fs::File;
    use std::io::BufReader;

    let file = File::open(path.as_ref()).map_err(|e| format!("Failed to open PNG file: {}", e))?;
    let decoder = png::Decoder::new(BufReader::new(file));
    let mut reader = decoder
        .read_info()
        .map_err(|e| format!("Failed to read PNG info: {}", e))?;

    let info = reader.info();
    let width = info.width;
    let height = info.height;
    let color_type = info.color_type;
    let bit_depth = info.bit_depth;

    let buffer_size = reader
        .output_buffer_size()
        .ok_or_else(|| "Failed to determine PNG buffer size".to_string())?;
    let mut buf = vec![0u8; buffer_size];
    let frame_info = reader
        .next_frame(&mut buf)
        .map_err(|e| format!("Failed to read PNG frame: {}", e))?;
    let bytes = &buf[..frame_info.buffer_size()];

    // Normalize the source layout to (channels, values) in f32.
    let (src_channels, values): (usize, Vec<f32>) = match (color_type, bit_depth) {
        (png::ColorType::Grayscale, png::BitDepth::Eight) => {
            (1, bytes.iter().map(|&v| v as f32 / 255.0).collect())
        }
        (png::ColorType::Grayscale, png::BitDepth::Sixteen) => (1, be16_to_f32(bytes)),
        (png::ColorType::Rgb, png::BitDepth::Eight) => {
            (3, bytes.iter().map(|&v| v as f32 / 255.0).collect())
        }
        (png::ColorType::Rgb, png::BitDepth::Sixteen) => (3, be16_to_f32(bytes)),
        (png::ColorType::Rgba, png::BitDepth::Eight) => {
            (4, bytes.iter().map(|&v| v as f32 / 255.0).collect())
        }
        (png::ColorType::Rgba, png::BitDepth::Sixteen) => (4, be16_to_f32(bytes)),
        _ => {
            return Err(format!(
                "Unsupported PNG format: {:?} with bit depth {:?}",
                color_type, bit_depth
            ));
        }
    };

    let pixel_count = width as usize * height as usize;
    if values.len() != pixel_count * src_channels {
        return Err(format!(
            "PNG buffer size mismatch: expected {}, got {}",
            pixel_count * src_channels,
            values.len()
        ));
    }

    let mut data = Vec::with_capacity(pixel_count * out_channels);
    for pixel in values.chunks_exact(src_channels) {
        let (r, g, b, a) = match src_channels {
            1 => (pixel[0], pixel[0], pixel[0], 1.0),
            3 => (pixel[0], pixel[1], pixel[2], 1.0),
            _ => (pixel[0], pixel[1], pixel[2], pixel[3]),
        };
        data.push(r);
        data.push(g);
        data.push(b);
        if out_channels == 4 {
            data.push(a);
        }
    }

    Ok((width, height, data))
}

/// Convert big-endian 16-bit samples to f32 in 0.0-1.0.
fn be16_to_f32(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(2)
        .map(|chunk| u16::from_be_bytes([chunk[0], chunk[1]]) as f32 / 65535.0)
        .collect()
}
